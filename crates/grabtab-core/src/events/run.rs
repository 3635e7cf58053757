//! Serialized event processing.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::download::{
    execute_plan, plan_activation, ActivationReport, DownloadHost, DownloadOptions,
};
use crate::tracker::StreamTracker;

use super::{HostEvent, RequestFilter};

/// State handed back once the event channel closes.
#[derive(Debug)]
pub struct LoopOutput {
    pub tracker: StreamTracker,
    /// Skipped activations in event order, followed by attempted ones in
    /// completion order.
    pub reports: Vec<ActivationReport>,
}

/// Processes events in arrival order until every sender is dropped.
///
/// Observations and removals are applied inline. An activation takes its
/// snapshot inline too, then its downloads run on a spawned task so that
/// later events are not held up. Outstanding activations are awaited before
/// returning.
pub async fn run_event_loop<H>(
    mut rx: mpsc::Receiver<HostEvent>,
    mut tracker: StreamTracker,
    host: Arc<H>,
    filter: &RequestFilter,
    options: &DownloadOptions,
) -> LoopOutput
where
    H: DownloadHost + 'static,
{
    let mut activations = JoinSet::new();
    let mut reports = Vec::new();

    while let Some(event) = rx.recv().await {
        match event {
            HostEvent::RequestCompleted {
                tab_id,
                url,
                response_headers,
            } => {
                if filter.matches(&url) {
                    tracker.observe(tab_id, &url, response_headers.as_deref());
                } else {
                    tracing::trace!(tab_id, url = %url, "request not matched by filter");
                }
            }
            HostEvent::TabRemoved { tab_id } => {
                tracker.forget(tab_id);
            }
            HostEvent::ActionClicked { tab_id } => {
                match plan_activation(&tracker, tab_id, options) {
                    Ok(plan) => {
                        let host = Arc::clone(&host);
                        activations.spawn(async move { execute_plan(plan, host.as_ref()).await });
                    }
                    Err(skipped) => reports.push(ActivationReport::Skipped(skipped)),
                }
            }
        }
    }

    while let Some(joined) = activations.join_next().await {
        match joined {
            Ok(report) => reports.push(report),
            Err(e) => tracing::error!("activation task failed: {}", e),
        }
    }

    LoopOutput { tracker, reports }
}
