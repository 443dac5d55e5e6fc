use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::Result;
use crate::indexer::exclusion::is_excluded;
use crate::languages::extension_of;

/// Extensions the compiler accepts as root files: sources, declarations
/// (`.d.ts` ends in `.ts`) and JSON.
pub const COMPILABLE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs", "json"];

/// Collects compiler-relevant files below a project root.
pub struct FileWalker {
    extensions: Vec<String>,
}

impl FileWalker {
    pub fn new() -> Self {
        Self {
            extensions: COMPILABLE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Walk `root` and return every compilable file, joined onto `root`.
    ///
    /// Excluded entries are pruned before descending. Symlinks are not
    /// followed. Any I/O error aborts the walk.
    pub fn walk(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_excluded_entry(entry));

        for entry in walker {
            let entry = entry?;
            if entry.depth() == 0 || entry.file_type().is_dir() {
                continue;
            }
            if self.is_compilable(entry.path()) {
                files.push(entry.into_path());
            }
        }

        tracing::debug!("Collected {} compilable files under {}", files.len(), root.display());
        Ok(files)
    }

    pub fn is_compilable(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| extension_of(&name.to_string_lossy()))
            .map_or(false, |ext| self.extensions.iter().any(|e| *e == ext))
    }
}

impl Default for FileWalker {
    fn default() -> Self {
        Self::new()
    }
}

/// Collect the compilable files under `project_root`.
pub fn collect(project_root: &Path) -> Result<Vec<PathBuf>> {
    FileWalker::new().walk(project_root)
}

fn is_excluded_entry(entry: &DirEntry) -> bool {
    is_excluded(&entry.file_name().to_string_lossy())
}
