//! Project structure model and its assembly.
//!
//! This module provides:
//! - The serializable tree (`ProjectStructure`, `DirectoryNode`, `FileNode`)
//! - The call-scoped path lookup filled while building the tree
//! - The top-level `analyze_project` entry point

pub mod assembler;
pub mod lookup;
pub mod models;

pub use assembler::{analyze_project, analyze_project_with, assemble, Analysis, ProjectAnalyzer};
pub use lookup::{NodeEntry, NodeIndex, NodeKind};
pub use models::{DirectoryNode, FileNode, ProjectStructure};

/// Caller-controlled knobs for one analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzeOptions {
    /// Sort files and directories by name at every level. Off by default:
    /// children then appear in the order the filesystem lists them.
    pub sort_children: bool,
    /// Deepest directory nesting below the root that may be entered.
    /// `None` means unlimited.
    pub max_depth: Option<usize>,
}

impl AnalyzeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sort_children(mut self, sort: bool) -> Self {
        self.sort_children = sort;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}
