//! Syntax check over the compiler-relevant root files.
//!
//! This is the analyzer's counterpart of constructing a compiler program: it
//! confirms that the effective options and the collected file set can be
//! loaded together. The result is informational; nothing downstream depends
//! on it beyond it having been built.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{jsonc, CompilerOptions};
use crate::languages::{classify, LanguageRegistry, LanguageTag};

use super::parser::Parser;

/// Per-file problem found while loading the program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDiagnostic {
    pub path: PathBuf,
    pub message: String,
}

/// Counts gathered while loading the program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramSummary {
    /// Files handed to the program builder
    pub candidate_files: usize,
    /// Candidates the options admitted as roots
    pub root_files: usize,
    pub typescript_files: usize,
    pub javascript_files: usize,
    pub json_files: usize,
    /// Candidates left out by the options (`allowJs`, `resolveJsonModule`)
    pub skipped_files: usize,
    pub diagnostics: Vec<FileDiagnostic>,
}

impl ProgramSummary {
    pub fn files_with_errors(&self) -> usize {
        self.diagnostics.len()
    }
}

pub struct Program {
    summary: ProgramSummary,
}

impl Program {
    /// Load every admitted root file under `options`.
    pub fn build(candidates: &[PathBuf], options: &CompilerOptions) -> Self {
        let parser = Parser::new(LanguageRegistry::new());
        let mut summary = ProgramSummary {
            candidate_files: candidates.len(),
            ..Default::default()
        };

        for path in candidates {
            let language = language_of(path);
            let admitted = match language {
                LanguageTag::TypeScript => true,
                LanguageTag::JavaScript => options.allows_js(),
                LanguageTag::Json => options.resolves_json(),
                LanguageTag::Svelte | LanguageTag::Other => false,
            };
            if !admitted {
                summary.skipped_files += 1;
                continue;
            }

            match language {
                LanguageTag::TypeScript => summary.typescript_files += 1,
                LanguageTag::JavaScript => summary.javascript_files += 1,
                _ => summary.json_files += 1,
            }

            if let Some(message) = check_file(&parser, path, language) {
                summary.diagnostics.push(FileDiagnostic {
                    path: path.clone(),
                    message,
                });
            }
            summary.root_files += 1;
        }

        tracing::debug!(
            "Program loaded {} of {} files ({} with errors)",
            summary.root_files,
            summary.candidate_files,
            summary.files_with_errors()
        );

        Self { summary }
    }

    pub fn into_summary(self) -> ProgramSummary {
        self.summary
    }
}

fn language_of(path: &Path) -> LanguageTag {
    path.file_name()
        .map(|name| classify(&name.to_string_lossy()))
        .unwrap_or(LanguageTag::Other)
}

fn check_file(parser: &Parser, path: &Path, language: LanguageTag) -> Option<String> {
    if language == LanguageTag::Json {
        return match std::fs::read_to_string(path) {
            Ok(content) => jsonc::parse(&content).err(),
            Err(e) => Some(e.to_string()),
        };
    }

    match parser.parse_file(path) {
        Ok(parsed) if parsed.has_errors() => {
            Some(format!("{} syntax error(s)", parsed.error_count()))
        }
        Ok(_) => None,
        Err(e) => Some(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_build_counts_files_by_kind() {
        let temp_dir = TempDir::new().unwrap();
        let files = vec![
            write(&temp_dir, "a.ts", "export const a: number = 1;"),
            write(&temp_dir, "b.tsx", "export const B = () => <b />;"),
            write(&temp_dir, "c.js", "module.exports = {};"),
            write(&temp_dir, "package.json", r#"{ "name": "x" }"#),
        ];

        let summary = Program::build(&files, &CompilerOptions::analysis_defaults()).into_summary();

        assert_eq!(summary.candidate_files, 4);
        assert_eq!(summary.root_files, 4);
        assert_eq!(summary.typescript_files, 2);
        assert_eq!(summary.javascript_files, 1);
        assert_eq!(summary.json_files, 1);
        assert_eq!(summary.skipped_files, 0);
        assert!(summary.diagnostics.is_empty());
    }

    #[test]
    fn test_options_filter_roots() {
        let temp_dir = TempDir::new().unwrap();
        let files = vec![
            write(&temp_dir, "a.ts", "let a = 1;"),
            write(&temp_dir, "c.js", "let c = 1;"),
            write(&temp_dir, "data.json", "{}"),
        ];
        let options = CompilerOptions {
            allow_js: Some(false),
            resolve_json_module: Some(false),
            ..Default::default()
        };

        let summary = Program::build(&files, &options).into_summary();

        assert_eq!(summary.root_files, 1);
        assert_eq!(summary.skipped_files, 2);
    }

    #[test]
    fn test_syntax_errors_become_diagnostics() {
        let temp_dir = TempDir::new().unwrap();
        let broken = write(&temp_dir, "broken.ts", "function (");
        let bad_json = write(&temp_dir, "bad.json", "{ \"a\": ");
        let good = write(&temp_dir, "good.ts", "export {};");

        let summary =
            Program::build(&[broken.clone(), bad_json.clone(), good], &CompilerOptions::analysis_defaults())
                .into_summary();

        assert_eq!(summary.files_with_errors(), 2);
        let paths: Vec<_> = summary.diagnostics.iter().map(|d| d.path.clone()).collect();
        assert!(paths.contains(&broken));
        assert!(paths.contains(&bad_json));
    }

    #[test]
    fn test_json_with_comments_is_clean() {
        let temp_dir = TempDir::new().unwrap();
        let tsconfig = write(&temp_dir, "tsconfig.json", "{ // c\n \"compilerOptions\": {}, }");

        let summary = Program::build(&[tsconfig], &CompilerOptions::analysis_defaults()).into_summary();

        assert!(summary.diagnostics.is_empty());
    }

    #[test]
    fn test_missing_file_is_diagnostic_not_error() {
        let temp_dir = TempDir::new().unwrap();
        let gone = temp_dir.path().join("gone.ts");

        let summary = Program::build(&[gone], &CompilerOptions::analysis_defaults()).into_summary();

        assert_eq!(summary.root_files, 1);
        assert_eq!(summary.files_with_errors(), 1);
    }

    #[test]
    fn test_empty_program() {
        let summary = Program::build(&[], &CompilerOptions::analysis_defaults()).into_summary();
        assert_eq!(summary, ProgramSummary::default());
    }
}
