use std::path::Path;
use std::sync::Arc;

use crate::error::{AnalysisError, Result};
use crate::languages::{LanguageGrammar, LanguageRegistry};

pub struct Parser {
    registry: LanguageRegistry,
}

impl Parser {
    pub fn new(registry: LanguageRegistry) -> Self {
        Self { registry }
    }

    pub fn parse_file(&self, path: &Path) -> Result<ParsedFile> {
        let grammar = self
            .registry
            .get_for_file(path)
            .ok_or_else(|| AnalysisError::Parse(format!("no grammar for {}", path.display())))?;

        let source = std::fs::read_to_string(path).map_err(|e| AnalysisError::io(path, e))?;
        self.parse_source(&source, grammar)
    }

    pub fn parse_source(&self, source: &str, grammar: Arc<dyn LanguageGrammar>) -> Result<ParsedFile> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&grammar.language())
            .map_err(|e| AnalysisError::Parse(e.to_string()))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| AnalysisError::Parse("Failed to parse source".to_string()))?;

        Ok(ParsedFile {
            tree,
            grammar: grammar.name(),
        })
    }
}

pub struct ParsedFile {
    pub tree: tree_sitter::Tree,
    pub grammar: &'static str,
}

impl ParsedFile {
    pub fn root_node(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }

    pub fn has_errors(&self) -> bool {
        self.root_node().has_error()
    }

    /// Number of ERROR and MISSING nodes in the tree.
    pub fn error_count(&self) -> usize {
        if !self.has_errors() {
            return 0;
        }

        let mut count = 0;
        let mut cursor = self.tree.walk();
        'outer: loop {
            let node = cursor.node();
            if node.is_error() || node.is_missing() {
                count += 1;
            }

            // Only descend into subtrees that contain errors.
            if node.has_error() && !node.is_error() && cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    continue 'outer;
                }
                if !cursor.goto_parent() {
                    break 'outer;
                }
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::languages::LanguageRegistry;
    use tempfile::TempDir;

    fn create_parser() -> Parser {
        Parser::new(LanguageRegistry::new())
    }

    #[test]
    fn test_parse_source_typescript() {
        let parser = create_parser();
        let registry = LanguageRegistry::new();
        let grammar = registry.get_by_name("typescript").unwrap();

        let source = r#"
function greet(name: string): string {
    return `Hello, ${name}!`;
}
"#;

        let parsed = parser.parse_source(source, grammar).unwrap();
        assert_eq!(parsed.grammar, "typescript");
        assert!(parsed.root_node().child_count() > 0);
        assert!(!parsed.has_errors());
        assert_eq!(parsed.error_count(), 0);
    }

    #[test]
    fn test_parse_source_tsx() {
        let parser = create_parser();
        let registry = LanguageRegistry::new();
        let grammar = registry.get_by_name("tsx").unwrap();

        let source = "export const App = () => <div className=\"app\">hi</div>;\n";

        let parsed = parser.parse_source(source, grammar).unwrap();
        assert!(!parsed.has_errors());
    }

    #[test]
    fn test_parse_source_with_syntax_error() {
        let parser = create_parser();
        let registry = LanguageRegistry::new();
        let grammar = registry.get_by_name("typescript").unwrap();

        let parsed = parser.parse_source("function (", grammar).unwrap();
        assert!(parsed.has_errors());
        assert!(parsed.error_count() > 0);
    }

    #[test]
    fn test_parse_source_empty() {
        let parser = create_parser();
        let registry = LanguageRegistry::new();
        let grammar = registry.get_by_name("typescript").unwrap();

        let parsed = parser.parse_source("", grammar).unwrap();
        assert!(!parsed.has_errors());
    }

    #[test]
    fn test_parse_file_picks_grammar_by_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("view.jsx");
        std::fs::write(&path, "const v = <span />;\n").unwrap();

        let parsed = create_parser().parse_file(&path).unwrap();
        assert_eq!(parsed.grammar, "tsx");
    }

    #[test]
    fn test_parse_file_unsupported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.json");
        std::fs::write(&path, "{}").unwrap();

        let result = create_parser().parse_file(&path);
        assert!(matches!(result, Err(AnalysisError::Parse(_))));
    }

    #[test]
    fn test_parse_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let result = create_parser().parse_file(&temp_dir.path().join("gone.ts"));
        assert!(matches!(result, Err(AnalysisError::Io { .. })));
    }
}
