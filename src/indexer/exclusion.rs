/// Dependency cache directory skipped during every walk.
pub const DEPENDENCY_CACHE_DIR: &str = "node_modules";

/// Prefix marking hidden entries.
pub const HIDDEN_PREFIX: char = '.';

/// True when a directory entry must be left out of both traversal passes.
///
/// Only entry names are checked; the project root itself is never excluded.
pub fn is_excluded(entry_name: &str) -> bool {
    entry_name == DEPENDENCY_CACHE_DIR || entry_name.starts_with(HIDDEN_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_cache_excluded() {
        assert!(is_excluded("node_modules"));
    }

    #[test]
    fn test_hidden_entries_excluded() {
        assert!(is_excluded(".git"));
        assert!(is_excluded(".hidden"));
        assert!(is_excluded(".env"));
        assert!(is_excluded("."));
    }

    #[test]
    fn test_regular_entries_kept() {
        assert!(!is_excluded("src"));
        assert!(!is_excluded("package.json"));
        assert!(!is_excluded("node_modules_backup"));
        assert!(!is_excluded("my.node_modules"));
        assert!(!is_excluded("Node_Modules"));
        assert!(!is_excluded("file.hidden"));
    }
}
