//! `grabtab inspect <har>` – show the best streams per tab in a capture.

use anyhow::Result;
use grabtab_core::config::GrabConfig;
use grabtab_core::download::DownloadOptions;
use grabtab_core::har;
use grabtab_core::media::MediaKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::host::DryRunHost;
use crate::cli::session::run_feed;

pub async fn run_inspect(cfg: &GrabConfig, path: &Path) -> Result<()> {
    let events = har::load_capture(path)?;
    let host = Arc::new(DryRunHost::new(PathBuf::from(".")));
    let out = run_feed(cfg, host, &DownloadOptions::from(cfg), |tx| async move {
        for ev in events {
            tx.send(ev).await?;
        }
        anyhow::Ok(())
    })
    .await?;

    let tracker = out.tracker;
    if tracker.is_empty() {
        println!("No media requests matching \"{}\" in capture.", cfg.url_filter);
        return Ok(());
    }
    println!("{:<6} {:<6} {:<12} {}", "TAB", "KIND", "SIZE", "URL");
    for tab_id in tracker.tab_ids() {
        let Some(entry) = tracker.get(tab_id) else {
            continue;
        };
        for kind in [MediaKind::Video, MediaKind::Audio] {
            match entry.get(kind) {
                Some(c) => println!("{:<6} {:<6} {:<12} {}", tab_id, kind, c.size, c.url),
                None => println!("{:<6} {:<6} {:<12} {}", tab_id, kind, "-", "-"),
            }
        }
    }
    Ok(())
}
