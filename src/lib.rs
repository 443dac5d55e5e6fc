pub mod config;
pub mod error;
pub mod indexer;
pub mod languages;
pub mod structure;

pub use config::{
    resolve_config, CompilerOptions, ConfigDiagnostic, ConfigSource, EffectiveConfig,
};
pub use error::{AnalysisError, InvalidRootReason, Result};
pub use indexer::{collect, is_excluded, FileWalker, Program, ProgramSummary, TreeBuilder};
pub use languages::{classify, LanguageRegistry, LanguageTag};
pub use structure::{
    analyze_project, analyze_project_with, assemble, Analysis, AnalyzeOptions, DirectoryNode,
    FileNode, NodeIndex, NodeKind, ProjectAnalyzer, ProjectStructure,
};
