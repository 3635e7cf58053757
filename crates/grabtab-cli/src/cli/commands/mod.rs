//! CLI command handlers. Each command is in its own file.

mod grab;
mod inspect;
mod strip_range;
mod watch;

pub use grab::run_grab;
pub use inspect::run_inspect;
pub use strip_range::run_strip_range;
pub use watch::run_watch;

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use grabtab_core::config::GrabConfig;
use grabtab_core::download::{CurlHost, DownloadOptions};
use grabtab_core::events::{HostEvent, LoopOutput};
use tokio::sync::mpsc;

use super::host::{DryRunHost, TtyPrompt};
use super::session::run_feed;

enum Host {
    DryRun(Arc<DryRunHost>),
    Curl(Arc<CurlHost<TtyPrompt>>),
}

/// Download host and options selected from config and command flags.
pub struct HostChoice {
    host: Host,
    options: DownloadOptions,
}

impl HostChoice {
    /// `--out-dir` wins over the configured directory, which wins over the
    /// current directory.
    pub fn resolve(
        cfg: &GrabConfig,
        out_dir: Option<PathBuf>,
        dry_run: bool,
        no_prompt: bool,
    ) -> Result<Self> {
        let dir = match out_dir.or_else(|| cfg.download_dir.clone()) {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };
        let mut options = DownloadOptions::from(cfg);
        if no_prompt {
            options.prompt_user = false;
        }
        let host = if dry_run {
            Host::DryRun(Arc::new(DryRunHost::new(dir)))
        } else {
            let host = CurlHost::with_location(dir, TtyPrompt).on_complete(|t| match &t.result {
                Ok(bytes) => println!("saved {} ({bytes} bytes)", t.target.display()),
                Err(e) => println!("failed {}: {e}", t.target.display()),
            });
            Host::Curl(Arc::new(host))
        };
        Ok(Self { host, options })
    }

    pub async fn run<F, Fut>(&self, cfg: &GrabConfig, feed: F) -> Result<LoopOutput>
    where
        F: FnOnce(mpsc::Sender<HostEvent>) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        match &self.host {
            Host::DryRun(h) => run_feed(cfg, Arc::clone(h), &self.options, feed).await,
            Host::Curl(h) => run_feed(cfg, Arc::clone(h), &self.options, feed).await,
        }
    }

    /// Waits for running transfers. Returns the number of failed transfers.
    pub async fn finish(&self) -> usize {
        let Host::Curl(host) = &self.host else {
            return 0;
        };
        let summary = host.wait_all().await;
        println!(
            "{} download(s) saved, {} failed",
            summary.succeeded, summary.failed
        );
        summary.failed
    }
}
