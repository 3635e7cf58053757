//! `grabtab grab <har>` – replay a capture and download the best streams.

use anyhow::Result;
use grabtab_core::config::GrabConfig;
use grabtab_core::events::HostEvent;
use grabtab_core::har;
use grabtab_core::tracker::TabId;
use std::collections::BTreeSet;
use std::path::Path;

use super::HostChoice;
use crate::cli::session::print_reports;

pub async fn run_grab(
    cfg: &GrabConfig,
    path: &Path,
    tab: Option<TabId>,
    host: HostChoice,
) -> Result<()> {
    let mut events = har::load_capture(path)?;
    let tabs: Vec<TabId> = match tab {
        Some(t) => vec![t],
        None => media_tabs(cfg, &events),
    };
    if tabs.is_empty() {
        println!("No media requests matching \"{}\" in capture.", cfg.url_filter);
        return Ok(());
    }
    events.extend(tabs.iter().map(|t| HostEvent::ActionClicked { tab_id: Some(*t) }));

    let out = host
        .run(cfg, |tx| async move {
            for ev in events {
                tx.send(ev).await?;
            }
            anyhow::Ok(())
        })
        .await?;
    print_reports(&out.reports);

    let failed = host.finish().await;
    if failed > 0 {
        tracing::warn!(failed, "some downloads failed");
    }
    Ok(())
}

/// Tabs (ascending) that made at least one request the filter accepts.
fn media_tabs(cfg: &GrabConfig, events: &[HostEvent]) -> Vec<TabId> {
    let filter = cfg.request_filter();
    let tabs: BTreeSet<TabId> = events
        .iter()
        .filter_map(|ev| match ev {
            HostEvent::RequestCompleted { tab_id, url, .. }
                if *tab_id >= 0 && filter.matches(url) =>
            {
                Some(*tab_id)
            }
            _ => None,
        })
        .collect();
    tabs.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed(tab_id: TabId, url: &str) -> HostEvent {
        HostEvent::RequestCompleted {
            tab_id,
            url: url.to_string(),
            response_headers: None,
        }
    }

    #[test]
    fn media_tabs_are_distinct_sorted_and_filtered() {
        let cfg = GrabConfig::default();
        let events = vec![
            completed(2, "https://r.example.com/videoplayback?itag=18"),
            completed(0, "https://www.example.com/watch"),
            completed(1, "https://r.example.com/videoplayback?itag=140"),
            completed(2, "https://r.example.com/videoplayback?itag=22"),
            completed(-1, "https://r.example.com/videoplayback?itag=18"),
            HostEvent::TabRemoved { tab_id: 5 },
        ];
        assert_eq!(media_tabs(&cfg, &events), vec![1, 2]);
    }
}
