//! CLI for the rmf post media fetcher.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rmf_core::config;
use std::path::PathBuf;

use commands::{run_config, run_fetch, run_resolve};

/// Top-level CLI for rmf.
#[derive(Debug, Parser)]
#[command(name = "rmf")]
#[command(about = "rmf: resolve post links to media and fetch it", long_about = None)]
pub struct Cli {
    /// Log filter directive (overridden by RUST_LOG), e.g. "debug".
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Resolve a post link and print the media descriptor as JSON.
    Resolve {
        /// Post URL or short share link.
        url: String,
    },

    /// Resolve a post link and download its media.
    Fetch {
        /// Post URL or short share link.
        url: String,

        /// Store files here instead of the configured media directory.
        #[arg(long, value_name = "DIR")]
        media_dir: Option<PathBuf>,
    },

    /// Print the config file path and the effective configuration.
    Config,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        crate::init_logging(cli.log_filter.as_deref());

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Resolve { url } => run_resolve(&cfg, &url)?,
            CliCommand::Fetch { url, media_dir } => run_fetch(&cfg, &url, media_dir)?,
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
