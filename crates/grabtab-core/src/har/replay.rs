//! Turn a HAR capture into an ordered observation feed.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

use crate::events::HostEvent;
use crate::media::ResponseHeader;
use crate::tracker::TabId;

use super::parse::{HarHeader, HarLog};

/// Reads a HAR file and returns one `RequestCompleted` event per completed
/// entry, in file order.
pub fn load_capture(path: &Path) -> Result<Vec<HostEvent>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read HAR file: {}", path.display()))?;
    capture_from_slice(&bytes).with_context(|| format!("parse HAR JSON: {}", path.display()))
}

/// Same as [`load_capture`] for in-memory HAR JSON.
///
/// Pages map to tab ids by their position in `log.pages`; entries with no
/// (or an unknown) `pageref` belong to tab 0. Entries that never received a
/// response are skipped.
pub fn capture_from_slice(bytes: &[u8]) -> Result<Vec<HostEvent>> {
    let har: HarLog = serde_json::from_slice(bytes)?;

    let tabs: HashMap<&str, TabId> = har
        .log
        .pages
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id.as_str(), i as TabId))
        .collect();

    let mut skipped = 0usize;
    let mut events = Vec::with_capacity(har.log.entries.len());
    for entry in &har.log.entries {
        if entry.response.status == 0 {
            skipped += 1;
            continue;
        }
        let tab_id = entry
            .pageref
            .as_deref()
            .and_then(|r| tabs.get(r).copied())
            .unwrap_or(0);
        events.push(HostEvent::RequestCompleted {
            tab_id,
            url: entry.request.url.clone(),
            response_headers: Some(convert_headers(&entry.response.headers)),
        });
    }
    tracing::debug!(
        pages = tabs.len(),
        events = events.len(),
        skipped,
        "loaded HAR capture"
    );
    Ok(events)
}

fn convert_headers(headers: &[HarHeader]) -> Vec<ResponseHeader> {
    headers
        .iter()
        .map(|h| ResponseHeader::new(h.name.as_str(), h.value.as_str()))
        .collect()
}
