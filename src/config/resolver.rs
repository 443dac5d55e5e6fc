//! Effective configuration for a project root.

use std::path::Path;

use super::{
    jsonc, tsconfig, CompilerOptions, ConfigDiagnostic, ConfigSource, EffectiveConfig,
};

pub const TSCONFIG_FILENAME: &str = "tsconfig.json";

/// Resolve the effective compiler configuration for `project_root`.
///
/// Never fails: problems with the project file are returned as diagnostics
/// and the defaults are used unchanged.
pub fn resolve_config(project_root: &Path) -> (EffectiveConfig, Vec<ConfigDiagnostic>) {
    let tsconfig_path = project_root.join(TSCONFIG_FILENAME);
    if !tsconfig_path.is_file() {
        tracing::debug!("No {} in {}, using defaults", TSCONFIG_FILENAME, project_root.display());
        return (EffectiveConfig::defaults(), Vec::new());
    }

    match load_project_options(&tsconfig_path) {
        Ok(project) => {
            let mut options = CompilerOptions::analysis_defaults().overlay(project);
            // Analysis never emits, whatever the project asks for.
            options.no_emit = Some(true);

            tracing::debug!("Applied compiler options from {}", tsconfig_path.display());
            (
                EffectiveConfig {
                    options,
                    source: ConfigSource::Project(tsconfig_path),
                },
                Vec::new(),
            )
        }
        Err(diagnostic) => {
            tracing::warn!("{}; using default compiler options", diagnostic);
            (EffectiveConfig::defaults(), vec![diagnostic])
        }
    }
}

fn load_project_options(path: &Path) -> Result<CompilerOptions, ConfigDiagnostic> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigDiagnostic::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if content.trim().is_empty() {
        return Ok(CompilerOptions::default());
    }

    let document = jsonc::parse(&content).map_err(|message| ConfigDiagnostic::Parse {
        path: path.to_path_buf(),
        message,
    })?;

    let document = document.as_object().ok_or_else(|| ConfigDiagnostic::Parse {
        path: path.to_path_buf(),
        message: "expected a JSON object at the top level".to_string(),
    })?;

    tsconfig::convert_compiler_options(tsconfig::compiler_options_of(document)).map_err(|errors| {
        ConfigDiagnostic::Conversion {
            path: path.to_path_buf(),
            errors,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ModuleKind, ScriptTarget};
    use std::fs;
    use tempfile::TempDir;

    fn write_tsconfig(dir: &TempDir, content: &str) {
        fs::write(dir.path().join(TSCONFIG_FILENAME), content).unwrap();
    }

    #[test]
    fn test_no_tsconfig_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();

        let (config, diagnostics) = resolve_config(temp_dir.path());

        assert!(diagnostics.is_empty());
        assert!(!config.overlay_applied());
        assert_eq!(config.options, CompilerOptions::analysis_defaults());
    }

    #[test]
    fn test_project_overrides_defaults() {
        let temp_dir = TempDir::new().unwrap();
        write_tsconfig(
            &temp_dir,
            r#"{
    "compilerOptions": {
        "target": "es2019",
        "strict": true,
        "resolveJsonModule": false
    }
}"#,
        );

        let (config, diagnostics) = resolve_config(temp_dir.path());

        assert!(diagnostics.is_empty());
        assert!(config.overlay_applied());
        assert_eq!(config.options.target, Some(ScriptTarget::ES2019));
        assert_eq!(config.options.strict, Some(true));
        assert_eq!(config.options.resolve_json_module, Some(false));
        assert_eq!(config.options.module, Some(ModuleKind::ESNext));
        assert_eq!(
            config.source,
            ConfigSource::Project(temp_dir.path().join(TSCONFIG_FILENAME))
        );
    }

    #[test]
    fn test_no_emit_is_forced() {
        let temp_dir = TempDir::new().unwrap();
        write_tsconfig(&temp_dir, r#"{ "compilerOptions": { "noEmit": false, "outDir": "dist" } }"#);

        let (config, diagnostics) = resolve_config(temp_dir.path());

        assert!(diagnostics.is_empty());
        assert!(config.overlay_applied());
        assert_eq!(config.options.no_emit, Some(true));
        assert_eq!(config.options.out_dir.as_deref(), Some("dist"));
    }

    #[test]
    fn test_tsconfig_with_comments_is_accepted() {
        let temp_dir = TempDir::new().unwrap();
        write_tsconfig(
            &temp_dir,
            r#"{
    // generated by a scaffolder
    "compilerOptions": {
        "strict": true, /* keep */
    },
}"#,
        );

        let (config, diagnostics) = resolve_config(temp_dir.path());

        assert!(diagnostics.is_empty());
        assert_eq!(config.options.strict, Some(true));
    }

    #[test]
    fn test_malformed_tsconfig_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        write_tsconfig(&temp_dir, "{ \"compilerOptions\": { \"strict\": ");

        let (config, diagnostics) = resolve_config(temp_dir.path());

        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(diagnostics[0], ConfigDiagnostic::Parse { .. }));
        assert!(!config.overlay_applied());
        assert_eq!(config.options, CompilerOptions::analysis_defaults());
    }

    #[test]
    fn test_invalid_options_fall_back() {
        let temp_dir = TempDir::new().unwrap();
        write_tsconfig(
            &temp_dir,
            r#"{ "compilerOptions": { "target": "es2099", "strict": true } }"#,
        );

        let (config, diagnostics) = resolve_config(temp_dir.path());

        assert_eq!(diagnostics.len(), 1);
        match &diagnostics[0] {
            ConfigDiagnostic::Conversion { errors, .. } => assert_eq!(errors.len(), 1),
            other => panic!("unexpected diagnostic: {other:?}"),
        }
        // Nothing from the project file leaks into the effective options.
        assert!(config.options.strict.is_none());
        assert_eq!(config.options.target, Some(ScriptTarget::ESNext));
    }

    #[test]
    fn test_unknown_option_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        write_tsconfig(
            &temp_dir,
            r#"{"compilerOptions":{"strict":true,"notARealOption":1,"sourceMap":"yes"}}"#,
        );

        let (config, diagnostics) = resolve_config(temp_dir.path());

        assert_eq!(diagnostics.len(), 1);
        match &diagnostics[0] {
            ConfigDiagnostic::Conversion { errors, .. } => {
                assert_eq!(errors.len(), 2);
                assert!(errors.iter().any(|e| e.contains("notARealOption")));
            }
            other => panic!("unexpected diagnostic: {other:?}"),
        }
        assert!(!config.overlay_applied());
        assert_eq!(config.options, CompilerOptions::analysis_defaults());
    }

    #[test]
    fn test_non_object_document_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        write_tsconfig(&temp_dir, "[1, 2]");

        let (_, diagnostics) = resolve_config(temp_dir.path());

        assert!(matches!(diagnostics[0], ConfigDiagnostic::Parse { .. }));
    }

    #[test]
    fn test_empty_tsconfig_applies_nothing() {
        let temp_dir = TempDir::new().unwrap();
        write_tsconfig(&temp_dir, "  \n");

        let (config, diagnostics) = resolve_config(temp_dir.path());

        assert!(diagnostics.is_empty());
        assert!(config.overlay_applied());
        assert_eq!(config.options, CompilerOptions::analysis_defaults());
    }

    #[test]
    fn test_tsconfig_directory_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join(TSCONFIG_FILENAME)).unwrap();

        let (config, diagnostics) = resolve_config(temp_dir.path());

        assert!(diagnostics.is_empty());
        assert!(!config.overlay_applied());
    }
}
