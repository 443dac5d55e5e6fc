//! Build configuration for the analyzed project.
//!
//! This module provides:
//! - A typed subset of TypeScript compiler options with permissive defaults
//! - Field-by-field overlay of a project-local `tsconfig.json`
//! - Recoverable diagnostics when the project configuration cannot be used

pub mod jsonc;
pub mod resolver;
pub mod tsconfig;

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

pub use resolver::{resolve_config, TSCONFIG_FILENAME};
pub use tsconfig::convert_compiler_options;

/// Compiler options understood by the analyzer.
///
/// Every field is optional so that a project file can override only the
/// options it names. Known compiler options without a field here are
/// type-checked and kept in `other`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_js: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_js: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolve_json_module: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub es_module_interop: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_synthetic_default_imports: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<ScriptTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<ModuleKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_resolution: Option<ModuleResolution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsx: Option<JsxMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_lib_check: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_consistent_casing_in_file_names: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_emit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declaration: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isolated_modules: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbatim_module_syntax: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lib: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<BTreeMap<String, Vec<String>>>,
    /// Known options without a typed field, keyed as written
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub other: BTreeMap<String, serde_json::Value>,
}

impl CompilerOptions {
    /// The analysis defaults: permissive, newest target, never emitting.
    pub fn analysis_defaults() -> Self {
        Self {
            allow_js: Some(true),
            resolve_json_module: Some(true),
            es_module_interop: Some(true),
            target: Some(ScriptTarget::ESNext),
            module: Some(ModuleKind::ESNext),
            module_resolution: Some(ModuleResolution::Bundler),
            skip_lib_check: Some(true),
            force_consistent_casing_in_file_names: Some(true),
            no_emit: Some(true),
            ..Default::default()
        }
    }

    /// Overlay `project` on top of `self`: every option the project sets wins.
    pub fn overlay(self, project: CompilerOptions) -> Self {
        let mut other = self.other;
        other.extend(project.other);

        Self {
            allow_js: project.allow_js.or(self.allow_js),
            check_js: project.check_js.or(self.check_js),
            resolve_json_module: project.resolve_json_module.or(self.resolve_json_module),
            es_module_interop: project.es_module_interop.or(self.es_module_interop),
            allow_synthetic_default_imports: project
                .allow_synthetic_default_imports
                .or(self.allow_synthetic_default_imports),
            target: project.target.or(self.target),
            module: project.module.or(self.module),
            module_resolution: project.module_resolution.or(self.module_resolution),
            jsx: project.jsx.or(self.jsx),
            strict: project.strict.or(self.strict),
            skip_lib_check: project.skip_lib_check.or(self.skip_lib_check),
            force_consistent_casing_in_file_names: project
                .force_consistent_casing_in_file_names
                .or(self.force_consistent_casing_in_file_names),
            no_emit: project.no_emit.or(self.no_emit),
            declaration: project.declaration.or(self.declaration),
            isolated_modules: project.isolated_modules.or(self.isolated_modules),
            verbatim_module_syntax: project
                .verbatim_module_syntax
                .or(self.verbatim_module_syntax),
            base_url: project.base_url.or(self.base_url),
            root_dir: project.root_dir.or(self.root_dir),
            out_dir: project.out_dir.or(self.out_dir),
            lib: project.lib.or(self.lib),
            types: project.types.or(self.types),
            paths: project.paths.or(self.paths),
            other,
        }
    }

    pub fn allows_js(&self) -> bool {
        self.allow_js.unwrap_or(false)
    }

    pub fn resolves_json(&self) -> bool {
        self.resolve_json_module.unwrap_or(false)
    }
}

macro_rules! option_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $canonical:literal $(| $alias:literal)*),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $canonical),+
                }
            }

            /// Case-insensitive lookup, accepting the compiler's aliases.
            pub fn from_str(s: &str) -> Option<Self> {
                match s.to_ascii_lowercase().as_str() {
                    $($canonical $(| $alias)* => Some($name::$variant),)+
                    _ => None,
                }
            }

            pub fn allowed_values() -> &'static [&'static str] {
                &[$($canonical),+]
            }
        }

        impl Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

option_enum!(
    /// `target` compiler option
    ScriptTarget {
        ES3 => "es3",
        ES5 => "es5",
        ES2015 => "es2015" | "es6",
        ES2016 => "es2016",
        ES2017 => "es2017",
        ES2018 => "es2018",
        ES2019 => "es2019",
        ES2020 => "es2020",
        ES2021 => "es2021",
        ES2022 => "es2022",
        ES2023 => "es2023",
        ES2024 => "es2024",
        ESNext => "esnext",
    }
);

option_enum!(
    /// `module` compiler option
    ModuleKind {
        None => "none",
        CommonJs => "commonjs",
        Amd => "amd",
        Umd => "umd",
        System => "system",
        ES2015 => "es2015" | "es6",
        ES2020 => "es2020",
        ES2022 => "es2022",
        ESNext => "esnext",
        Node16 => "node16",
        Node18 => "node18",
        NodeNext => "nodenext",
        Preserve => "preserve",
    }
);

option_enum!(
    /// `moduleResolution` compiler option
    ModuleResolution {
        Classic => "classic",
        Node10 => "node10" | "node",
        Node16 => "node16",
        NodeNext => "nodenext",
        Bundler => "bundler",
    }
);

option_enum!(
    /// `jsx` compiler option
    JsxMode {
        Preserve => "preserve",
        React => "react",
        ReactNative => "react-native",
        ReactJsx => "react-jsx",
        ReactJsxDev => "react-jsxdev",
    }
);

/// Where the effective options came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Defaults,
    Project(PathBuf),
}

/// Compiler options after merging defaults with the project override.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveConfig {
    pub options: CompilerOptions,
    pub source: ConfigSource,
}

impl EffectiveConfig {
    pub fn defaults() -> Self {
        Self {
            options: CompilerOptions::analysis_defaults(),
            source: ConfigSource::Defaults,
        }
    }

    /// True when a project `tsconfig.json` was applied on top of the defaults.
    pub fn overlay_applied(&self) -> bool {
        matches!(self.source, ConfigSource::Project(_))
    }
}

/// Non-fatal problems with the project configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigDiagnostic {
    Read { path: PathBuf, message: String },
    Parse { path: PathBuf, message: String },
    Conversion { path: PathBuf, errors: Vec<String> },
}

impl ConfigDiagnostic {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigDiagnostic::Read { path, .. }
            | ConfigDiagnostic::Parse { path, .. }
            | ConfigDiagnostic::Conversion { path, .. } => path,
        }
    }
}

impl fmt::Display for ConfigDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigDiagnostic::Read { path, message } => {
                write!(f, "could not read {}: {}", path.display(), message)
            }
            ConfigDiagnostic::Parse { path, message } => {
                write!(f, "could not parse {}: {}", path.display(), message)
            }
            ConfigDiagnostic::Conversion { path, errors } => write!(
                f,
                "invalid compiler options in {}: {}",
                path.display(),
                errors.join("; ")
            ),
        }
    }
}
