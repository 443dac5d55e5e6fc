pub mod exclusion;
pub mod parser;
pub mod program;
pub mod tree_builder;
pub mod walker;

pub use exclusion::is_excluded;
pub use parser::{ParsedFile, Parser};
pub use program::{FileDiagnostic, Program, ProgramSummary};
pub use tree_builder::{Children, TreeBuilder};
pub use walker::{collect, FileWalker, COMPILABLE_EXTENSIONS};
