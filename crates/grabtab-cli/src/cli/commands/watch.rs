//! `grabtab watch` – act on JSON-lines host events read from stdin.

use anyhow::Result;
use grabtab_core::config::GrabConfig;
use grabtab_core::events::HostEvent;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::HostChoice;
use crate::cli::session::print_reports;

pub async fn run_watch(cfg: &GrabConfig, host: HostChoice) -> Result<()> {
    let out = host
        .run(cfg, |tx| async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                let Some(ev) = parse_event(&line) else {
                    continue;
                };
                if tx.send(ev).await.is_err() {
                    break;
                }
            }
            anyhow::Ok(())
        })
        .await?;
    print_reports(&out.reports);
    host.finish().await;
    tracing::info!(tabs = out.tracker.len(), "event feed closed");
    Ok(())
}

/// One event per non-blank line; malformed lines are logged and skipped.
fn parse_event(line: &str) -> Option<HostEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match serde_json::from_str(line) {
        Ok(ev) => Some(ev),
        Err(e) => {
            tracing::warn!("skipping malformed event: {}", e);
            None
        }
    }
}
