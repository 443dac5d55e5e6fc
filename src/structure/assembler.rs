use std::fs;
use std::path::{Component, Path, PathBuf};

use chrono::Utc;

use crate::config::{resolve_config, ConfigDiagnostic, EffectiveConfig};
use crate::error::{AnalysisError, InvalidRootReason, Result};
use crate::indexer::program::{Program, ProgramSummary};
use crate::indexer::tree_builder::TreeBuilder;
use crate::indexer::walker::FileWalker;

use super::lookup::{NodeIndex, NodeKind};
use super::models::{filesystem_timestamp, new_node_id, DirectoryNode, ProjectStructure};
use super::AnalyzeOptions;

/// Everything produced by one analysis run.
#[derive(Debug)]
pub struct Analysis {
    pub structure: ProjectStructure,
    pub config: EffectiveConfig,
    pub config_diagnostics: Vec<ConfigDiagnostic>,
    pub program: ProgramSummary,
    /// Relative path lookup for every node, root included under `""`
    pub index: NodeIndex,
}

pub struct ProjectAnalyzer {
    options: AnalyzeOptions,
}

impl ProjectAnalyzer {
    pub fn new(options: AnalyzeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AnalyzeOptions {
        &self.options
    }

    /// Analyze the project at `project_root`.
    ///
    /// Either the complete structure is returned or an error; a partially
    /// walked tree is never handed out.
    pub fn assemble(&self, project_root: &Path) -> Result<Analysis> {
        let root = normalize_root(project_root)?;
        let root_metadata = check_root(&root)?;
        let name = project_name(&root);

        tracing::info!("Analyzing project {} at {}", name, root.display());

        let (config, config_diagnostics) = resolve_config(&root);
        let candidates = FileWalker::new().walk(&root)?;
        let program = Program::build(&candidates, &config.options).into_summary();

        let root_id = new_node_id();
        let mut index = NodeIndex::new();
        index.insert("", root_id.clone(), NodeKind::Directory);
        let children = TreeBuilder::new(&self.options, &mut index).build_root(&root, &root_id)?;

        let root_directory = DirectoryNode {
            id: root_id,
            name: name.clone(),
            path: String::new(),
            parent_id: None,
            created_at: filesystem_timestamp(&root_metadata),
            child_file_nodes: children.files,
            child_directory_nodes: children.directories,
        };

        let structure = ProjectStructure {
            id: new_node_id(),
            name,
            root_path: root.to_string_lossy().into_owned(),
            created_at: Utc::now(),
            root_directory,
        };

        tracing::info!(
            "Analyzed {}: {} directories, {} files, {} program roots",
            structure.name,
            index.count(NodeKind::Directory),
            index.count(NodeKind::File),
            program.root_files
        );

        Ok(Analysis {
            structure,
            config,
            config_diagnostics,
            program,
            index,
        })
    }
}

impl Default for ProjectAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzeOptions::default())
    }
}

/// Analyze `project_root` with `options`.
pub fn assemble(project_root: &Path, options: &AnalyzeOptions) -> Result<Analysis> {
    ProjectAnalyzer::new(options.clone()).assemble(project_root)
}

/// Inbound entry point: the structure, or `None` if analysis failed.
pub fn analyze_project(project_path: impl AsRef<Path>) -> Option<ProjectStructure> {
    analyze_project_with(project_path, &AnalyzeOptions::default())
}

pub fn analyze_project_with(
    project_path: impl AsRef<Path>,
    options: &AnalyzeOptions,
) -> Option<ProjectStructure> {
    let project_path = project_path.as_ref();
    match assemble(project_path, options) {
        Ok(analysis) => Some(analysis.structure),
        Err(e) => {
            tracing::error!("Error analyzing project {}: {}", project_path.display(), e);
            None
        }
    }
}

/// Absolute form of `path` with `.` and `..` folded lexically.
fn normalize_root(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        let cwd = std::env::current_dir().map_err(|e| AnalysisError::io(path, e))?;
        cwd.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}

/// The root must exist and be a directory itself, not a link to one.
fn check_root(root: &Path) -> Result<fs::Metadata> {
    let metadata = match fs::symlink_metadata(root) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AnalysisError::InvalidRoot {
                path: root.to_path_buf(),
                reason: InvalidRootReason::NotFound,
            })
        }
        Err(e) => return Err(AnalysisError::io(root, e)),
    };

    if !metadata.is_dir() {
        return Err(AnalysisError::InvalidRoot {
            path: root.to_path_buf(),
            reason: InvalidRootReason::NotADirectory,
        });
    }
    Ok(metadata)
}

fn project_name(root: &Path) -> String {
    root.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.to_string_lossy().into_owned())
}
