pub mod typescript;

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Language tag attached to every file node.
///
/// Serialized in lowercase; `Svelte` is the component-markup tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageTag {
    TypeScript,
    JavaScript,
    Json,
    Svelte,
    Other,
}

impl LanguageTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageTag::TypeScript => "typescript",
            LanguageTag::JavaScript => "javascript",
            LanguageTag::Json => "json",
            LanguageTag::Svelte => "svelte",
            LanguageTag::Other => "other",
        }
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercased extension of a file name, without the dot.
///
/// Leading-dot names such as `.env` have no extension.
pub fn extension_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

/// Classify a file by its extension. Total: unknown extensions map to `Other`.
pub fn classify(file_name: &str) -> LanguageTag {
    match extension_of(file_name).as_deref() {
        Some("ts") | Some("tsx") => LanguageTag::TypeScript,
        Some("js") | Some("jsx") | Some("mjs") | Some("cjs") => LanguageTag::JavaScript,
        Some("json") => LanguageTag::Json,
        Some("svelte") => LanguageTag::Svelte,
        _ => LanguageTag::Other,
    }
}

pub trait LanguageGrammar: Send + Sync {
    fn name(&self) -> &'static str;
    fn file_extensions(&self) -> &[&'static str];
    fn language(&self) -> tree_sitter::Language;
}

/// Tree-sitter grammars keyed by file extension, used for syntax checks.
pub struct LanguageRegistry {
    languages: HashMap<String, Arc<dyn LanguageGrammar>>,
    extension_map: HashMap<String, String>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            languages: HashMap::new(),
            extension_map: HashMap::new(),
        };

        registry.register(Arc::new(typescript::TypeScriptGrammar));
        registry.register(Arc::new(typescript::TsxGrammar));

        registry
    }

    pub fn register(&mut self, grammar: Arc<dyn LanguageGrammar>) {
        let name = grammar.name().to_string();
        for ext in grammar.file_extensions() {
            self.extension_map.insert(ext.to_string(), name.clone());
        }
        self.languages.insert(name, grammar);
    }

    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn LanguageGrammar>> {
        self.languages.get(name).cloned()
    }

    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn LanguageGrammar>> {
        self.extension_map
            .get(&ext.to_lowercase())
            .and_then(|name| self.languages.get(name))
            .cloned()
    }

    pub fn get_for_file(&self, path: &Path) -> Option<Arc<dyn LanguageGrammar>> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.get_by_extension(ext))
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}
