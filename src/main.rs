mod cli;
mod mcp;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};

// Re-export from lib for internal use
use project_structure::{error, structure};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries JSON output and the MCP transport
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "project_structure=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            sort,
            max_depth,
            compact,
        } => {
            cli::analyze(&path, &cli::analyze_options(sort, max_depth), compact)?;
        }
        Commands::Serve => {
            cli::run_mcp_server().await?;
        }
    }

    Ok(())
}
