use std::fs;
use std::path::Path;

use crate::error::{AnalysisError, Result};
use crate::indexer::exclusion::is_excluded;
use crate::languages::classify;
use crate::structure::lookup::{NodeIndex, NodeKind};
use crate::structure::models::{filesystem_timestamp, new_node_id, DirectoryNode, FileNode};
use crate::structure::AnalyzeOptions;

/// Direct children of one directory.
#[derive(Debug, Default)]
pub struct Children {
    pub files: Vec<FileNode>,
    pub directories: Vec<DirectoryNode>,
}

/// Builds the directory/file tree one directory level at a time.
///
/// Every node created is also recorded in the caller's [`NodeIndex`].
pub struct TreeBuilder<'a> {
    options: &'a AnalyzeOptions,
    index: &'a mut NodeIndex,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(options: &'a AnalyzeOptions, index: &'a mut NodeIndex) -> Self {
        Self { options, index }
    }

    /// Build the children of the project root, owned by `root_id`.
    pub fn build_root(&mut self, root: &Path, root_id: &str) -> Result<Children> {
        self.build_tree(root, "", root_id, 0)
    }

    /// Read `dir` (at relative path `relative`, `depth` levels below the
    /// root) and recurse into its subdirectories.
    pub fn build_tree(
        &mut self,
        dir: &Path,
        relative: &str,
        parent_id: &str,
        depth: usize,
    ) -> Result<Children> {
        let mut children = Children::default();

        let entries = fs::read_dir(dir).map_err(|e| AnalysisError::io(dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| AnalysisError::io(dir, e))?;
            // Only UTF-8 names become nodes.
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    tracing::warn!("Skipping non-UTF-8 entry {:?} in {}", raw, dir.display());
                    continue;
                }
            };
            if is_excluded(&name) {
                continue;
            }

            let path = entry.path();
            let entry_relative = join_relative(relative, &name);
            // Symlinks are reported as themselves and never followed.
            let file_type = entry.file_type().map_err(|e| AnalysisError::io(&path, e))?;
            let metadata = entry.metadata().map_err(|e| AnalysisError::io(&path, e))?;
            let id = new_node_id();
            let created_at = filesystem_timestamp(&metadata);

            if file_type.is_dir() {
                if let Some(limit) = self.options.max_depth {
                    if depth + 1 > limit {
                        return Err(AnalysisError::DepthExceeded { path, limit });
                    }
                }

                let nested = self.build_tree(&path, &entry_relative, &id, depth + 1)?;
                self.index.insert(entry_relative.clone(), id.clone(), NodeKind::Directory);
                children.directories.push(DirectoryNode {
                    id,
                    name,
                    path: entry_relative,
                    parent_id: Some(parent_id.to_string()),
                    created_at,
                    child_file_nodes: nested.files,
                    child_directory_nodes: nested.directories,
                });
            } else {
                self.index.insert(entry_relative.clone(), id.clone(), NodeKind::File);
                children.files.push(FileNode {
                    id,
                    language: classify(&name),
                    name,
                    path: entry_relative,
                    created_at,
                    directory_id: Some(parent_id.to_string()),
                });
            }
        }

        if self.options.sort_children {
            children.files.sort_by(|a, b| a.name.cmp(&b.name));
            children.directories.sort_by(|a, b| a.name.cmp(&b.name));
        }

        Ok(children)
    }
}

/// Relative paths are `/`-joined UTF-8 names; callers skip other names.
fn join_relative(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}
