use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid project root {path}: {reason}")]
    InvalidRoot { path: PathBuf, reason: InvalidRootReason },

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Walk error: {0}")]
    Walk(String),

    #[error("Maximum directory depth {limit} exceeded at {path}")]
    DepthExceeded { path: PathBuf, limit: usize },

    #[error("MCP error: {0}")]
    Mcp(String),
}

impl AnalysisError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnalysisError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<walkdir::Error> for AnalysisError {
    fn from(err: walkdir::Error) -> Self {
        match err.path().map(|p| p.to_path_buf()) {
            Some(path) if err.io_error().is_some() => {
                let kind = err.io_error().map(|e| e.kind()).unwrap_or(std::io::ErrorKind::Other);
                AnalysisError::Io {
                    path,
                    source: std::io::Error::new(kind, err.to_string()),
                }
            }
            _ => AnalysisError::Walk(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidRootReason {
    NotFound,
    NotADirectory,
}

impl fmt::Display for InvalidRootReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidRootReason::NotFound => f.write_str("path does not exist"),
            InvalidRootReason::NotADirectory => f.write_str("path is not a directory"),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
