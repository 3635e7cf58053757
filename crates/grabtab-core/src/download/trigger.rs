//! Activation: snapshot a tab's candidates and request their downloads.

use crate::media::MediaKind;
use crate::tracker::{StreamTracker, TabId};
use crate::url_model::strip_trailing_range;

use super::{DownloadError, DownloadHost, DownloadOptions, DownloadRequest, DownloadStarted};

/// Why an activation produced no download requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skipped {
    /// No tab id, or a non-tab context.
    InvalidTab,
    /// The tab has no captured video or audio yet.
    NothingCaptured { tab_id: TabId },
}

/// Requests to issue for one activation, in order (video before audio).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationPlan {
    pub tab_id: TabId,
    pub requests: Vec<(MediaKind, DownloadRequest)>,
}

/// Outcome of one download request.
#[derive(Debug)]
pub struct DownloadAttempt {
    pub kind: MediaKind,
    pub url: String,
    pub result: Result<DownloadStarted, DownloadError>,
}

/// Outcome of an activation.
#[derive(Debug)]
pub enum ActivationReport {
    Skipped(Skipped),
    Attempted {
        tab_id: TabId,
        attempts: Vec<DownloadAttempt>,
    },
}

impl ActivationReport {
    pub fn attempts(&self) -> &[DownloadAttempt] {
        match self {
            ActivationReport::Skipped(_) => &[],
            ActivationReport::Attempted { attempts, .. } => attempts,
        }
    }

    /// Number of requests the host accepted.
    pub fn started(&self) -> usize {
        self.attempts().iter().filter(|a| a.result.is_ok()).count()
    }
}

/// Reads the tracker once and builds the download requests for `tab_id`.
///
/// This is the only part of an activation that touches tracker state, so a
/// caller can release the tracker before awaiting any download.
pub fn plan_activation(
    tracker: &StreamTracker,
    tab_id: Option<TabId>,
    options: &DownloadOptions,
) -> Result<ActivationPlan, Skipped> {
    let tab_id = match tab_id {
        Some(id) if id >= 0 => id,
        _ => return Err(Skipped::InvalidTab),
    };

    let entry = match tracker.snapshot(tab_id) {
        Some(entry) if !entry.is_empty() => entry,
        _ => {
            tracing::warn!(tab_id, "no videoplayback video/audio captured for tab");
            return Err(Skipped::NothingCaptured { tab_id });
        }
    };

    let requests = [MediaKind::Video, MediaKind::Audio]
        .into_iter()
        .filter_map(|kind| {
            let candidate = entry.get(kind)?;
            Some((
                kind,
                DownloadRequest {
                    url: strip_trailing_range(&candidate.url),
                    filename: options.filename(kind).to_string(),
                    prompt_user: options.prompt_user,
                },
            ))
        })
        .collect();

    Ok(ActivationPlan { tab_id, requests })
}

/// Issues each planned request in order. A failed request is logged and
/// recorded; it does not stop the next one. Nothing is retried.
pub async fn execute_plan<H>(plan: ActivationPlan, host: &H) -> ActivationReport
where
    H: DownloadHost + ?Sized,
{
    let mut attempts = Vec::with_capacity(plan.requests.len());
    for (kind, request) in plan.requests {
        let url = request.url.clone();
        let result = host.download(request).await;
        match &result {
            Ok(started) => tracing::info!(
                kind = kind.label(),
                tab_id = plan.tab_id,
                url = %url,
                target = %started.target.display(),
                "download started"
            ),
            Err(e) => tracing::error!(
                kind = kind.label(),
                tab_id = plan.tab_id,
                url = %url,
                "failed to download {}: {}",
                kind,
                e
            ),
        }
        attempts.push(DownloadAttempt { kind, url, result });
    }
    ActivationReport::Attempted {
        tab_id: plan.tab_id,
        attempts,
    }
}

/// Plans and executes an activation for `tab_id`.
pub async fn activate<H>(
    tracker: &StreamTracker,
    host: &H,
    tab_id: Option<TabId>,
    options: &DownloadOptions,
) -> ActivationReport
where
    H: DownloadHost + ?Sized,
{
    match plan_activation(tracker, tab_id, options) {
        Ok(plan) => execute_plan(plan, host).await,
        Err(skipped) => ActivationReport::Skipped(skipped),
    }
}
