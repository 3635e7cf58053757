//! Runs the core event loop against a feed produced by a command.

use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use grabtab_core::config::GrabConfig;
use grabtab_core::download::{ActivationReport, DownloadHost, DownloadOptions, Skipped};
use grabtab_core::events::{run_event_loop, HostEvent, LoopOutput};
use grabtab_core::tracker::StreamTracker;
use tokio::sync::mpsc;

const EVENT_BUFFER: usize = 256;

/// Spawns the event loop, lets `feed` push events until it returns (dropping
/// the sender), and returns the loop's final state.
pub async fn run_feed<H, F, Fut>(
    cfg: &GrabConfig,
    host: Arc<H>,
    options: &DownloadOptions,
    feed: F,
) -> Result<LoopOutput>
where
    H: DownloadHost + 'static,
    F: FnOnce(mpsc::Sender<HostEvent>) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let (tx, rx) = mpsc::channel(EVENT_BUFFER);
    let tracker = StreamTracker::with_policy(cfg.classification_policy());
    let filter = cfg.request_filter();
    let options = options.clone();
    let runner =
        tokio::spawn(async move { run_event_loop(rx, tracker, host, &filter, &options).await });

    let fed = feed(tx).await;
    let out = runner.await.context("event loop task failed")?;
    fed?;
    Ok(out)
}

pub fn print_reports(reports: &[ActivationReport]) {
    for report in reports {
        match report {
            ActivationReport::Skipped(Skipped::InvalidTab) => {
                println!("activation without a valid tab ignored");
            }
            ActivationReport::Skipped(Skipped::NothingCaptured { tab_id }) => {
                println!("tab {tab_id}: no video/audio captured");
            }
            ActivationReport::Attempted { tab_id, attempts } => {
                for a in attempts {
                    match &a.result {
                        Ok(started) => println!(
                            "tab {tab_id} {}: started #{} -> {}",
                            a.kind,
                            started.id,
                            started.target.display()
                        ),
                        Err(e) => println!("tab {tab_id} {}: failed: {e}", a.kind),
                    }
                }
            }
        }
    }
}
