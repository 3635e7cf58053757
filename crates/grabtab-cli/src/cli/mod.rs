//! CLI for grabtab.

mod commands;
mod host;
mod session;

use anyhow::Result;
use clap::{Parser, Subcommand};
use grabtab_core::config;
use std::path::PathBuf;

use commands::{run_grab, run_inspect, run_strip_range, run_watch, HostChoice};

/// Top-level CLI for grabtab.
#[derive(Debug, Parser)]
#[command(name = "grabtab")]
#[command(about = "grabtab: download the largest video/audio streams a tab requested", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Replay a HAR capture and show the best streams per tab.
    Inspect {
        /// Path to the HAR file.
        har: PathBuf,
    },

    /// Replay a HAR capture and download the best streams.
    Grab {
        /// Path to the HAR file.
        har: PathBuf,

        /// Only download for this tab (page index in the HAR). Default: every tab.
        #[arg(long, value_name = "ID", allow_negative_numbers = true)]
        tab: Option<i64>,

        /// Save into DIR instead of the configured download directory.
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,

        /// Print download requests instead of performing them.
        #[arg(long)]
        dry_run: bool,

        /// Never ask for a save location.
        #[arg(long)]
        no_prompt: bool,
    },

    /// Read JSON-lines host events from stdin and act on them.
    Watch {
        /// Save into DIR instead of the configured download directory.
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,

        /// Print download requests instead of performing them.
        #[arg(long)]
        dry_run: bool,

        /// Never ask for a save location.
        #[arg(long)]
        no_prompt: bool,
    },

    /// Print a URL with its byte-range parameter removed.
    StripRange {
        /// Captured media URL.
        url: String,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Inspect { har } => run_inspect(&cfg, &har).await?,
            CliCommand::Grab {
                har,
                tab,
                out_dir,
                dry_run,
                no_prompt,
            } => {
                let host = HostChoice::resolve(&cfg, out_dir, dry_run, no_prompt)?;
                run_grab(&cfg, &har, tab, host).await?;
            }
            CliCommand::Watch {
                out_dir,
                dry_run,
                no_prompt,
            } => {
                let host = HostChoice::resolve(&cfg, out_dir, dry_run, no_prompt)?;
                run_watch(&cfg, host).await?;
            }
            CliCommand::StripRange { url } => run_strip_range(&url),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
