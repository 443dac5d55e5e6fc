use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::structure::{assemble, AnalyzeOptions};

#[derive(Parser)]
#[command(name = "project-structure")]
#[command(about = "Analyze a TypeScript/JavaScript project into a navigable structure")]
#[command(version)]
#[command(after_long_help = r#"
EXAMPLES:
    # Print the structure of the current directory
    project-structure analyze

    # Analyze another project with children sorted by name
    project-structure analyze ../web-app --sort

    # Refuse trees nested deeper than 32 directories
    project-structure analyze ../web-app --max-depth 32

    # Start MCP server
    project-structure serve

Logging goes to stderr and is controlled with RUST_LOG, e.g.
RUST_LOG=project_structure=debug.
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a project directory and print its structure as JSON
    Analyze {
        /// Path to the project root
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Sort files and directories by name at every level
        #[arg(long)]
        sort: bool,

        /// Fail instead of descending deeper than this many directories
        #[arg(long)]
        max_depth: Option<usize>,

        /// Print compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Start MCP server on stdio
    Serve,
}

pub fn analyze_options(sort: bool, max_depth: Option<usize>) -> AnalyzeOptions {
    let options = AnalyzeOptions::new().with_sort_children(sort);
    match max_depth {
        Some(depth) => options.with_max_depth(depth),
        None => options,
    }
}

pub fn analyze(path: &PathBuf, options: &AnalyzeOptions, compact: bool) -> Result<()> {
    let analysis = assemble(path, options)?;

    for diagnostic in &analysis.config_diagnostics {
        eprintln!("Warning: {}", diagnostic);
    }

    let json = if compact {
        analysis.structure.to_json()?
    } else {
        analysis.structure.to_json_pretty()?
    };

    println!("{}", json);
    Ok(())
}

pub async fn run_mcp_server() -> Result<()> {
    use crate::mcp::McpServer;
    use rmcp::ServiceExt;

    let server = McpServer::new();

    let transport = (tokio::io::stdin(), tokio::io::stdout());
    let running = server
        .serve(transport)
        .await
        .map_err(|e| crate::error::AnalysisError::Mcp(e.to_string()))?;
    running
        .waiting()
        .await
        .map_err(|e| crate::error::AnalysisError::Mcp(e.to_string()))?;

    Ok(())
}
