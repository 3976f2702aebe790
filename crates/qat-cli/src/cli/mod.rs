//! CLI shell for the Quantum Asset Toolbox.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use qat_core::config;
use qat_core::sync::SyncOrchestrator;
use std::path::PathBuf;

use commands::{run_config, run_download, run_list, run_upload, spawn_event_log};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "qat")]
#[command(about = "Quantum Asset Toolbox: browse, upload, and download shared assets", long_about = None)]
pub struct Cli {
    /// Project directory assets are placed into (overrides workspace_dir in config).
    #[arg(long, global = true, value_name = "DIR")]
    pub workspace: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Refresh the catalog and list assets whose name contains QUERY (case-insensitive).
    List {
        /// Search text; omit to list everything.
        query: Option<String>,
    },

    /// Upload a local file, then refresh the catalog.
    Upload {
        /// File to upload.
        path: PathBuf,
    },

    /// Refresh the catalog and download the named assets concurrently.
    Download {
        /// Exact asset names as shown by `qat list`.
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Show the config file location and effective settings.
    Config,
}

impl Cli {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let workspace = match cli.workspace {
            Some(dir) => dir,
            None => cfg.workspace_or_cwd()?,
        };

        if let CliCommand::Config = cli.command {
            return run_config(&cfg, &workspace);
        }

        let (orch, events) = SyncOrchestrator::from_config(&cfg, &workspace);
        let event_log = spawn_event_log(events);

        let result = match cli.command {
            CliCommand::List { query } => run_list(&orch, query.as_deref()).await,
            CliCommand::Upload { path } => run_upload(&orch, &path).await,
            CliCommand::Download { names } => run_download(&orch, &names).await,
            CliCommand::Config => Ok(()),
        };

        // Closing the channel lets the event logger finish.
        drop(orch);
        let _ = event_log.await;
        result
    }
}

#[cfg(test)]
mod tests;
