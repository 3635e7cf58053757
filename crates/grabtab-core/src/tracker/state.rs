//! In-memory per-tab tracker state and the observe/forget/snapshot operations.

use std::collections::HashMap;
use std::fmt;

use crate::media::{extract_size, ClassificationPolicy, MarkerPolicy, MediaKind, ResponseHeader};

use super::entry::{Candidate, TabEntry, TabId};

/// Result of feeding one observation to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserveOutcome {
    /// Non-tab context (`tab_id < 0`); nothing was touched.
    Ignored,
    /// The observation became the new best candidate for its kind.
    Replaced { kind: MediaKind, size: u64 },
    /// An earlier candidate of the same kind is at least as large.
    Kept { kind: MediaKind },
}

/// Keyed store of the best video/audio candidate per tab.
///
/// The tracker has a single owner that feeds it observations in order; the
/// download trigger only reads cloned snapshots, so no locking is needed.
pub struct StreamTracker {
    entries: HashMap<TabId, TabEntry>,
    policy: Box<dyn ClassificationPolicy>,
}

impl fmt::Debug for StreamTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamTracker")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl Default for StreamTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamTracker {
    /// Tracker using the default marker classification.
    pub fn new() -> Self {
        Self::with_policy(MarkerPolicy::default())
    }

    pub fn with_policy(policy: impl ClassificationPolicy + 'static) -> Self {
        Self {
            entries: HashMap::new(),
            policy: Box::new(policy),
        }
    }

    /// Records one completed request for `tab_id`.
    pub fn observe(
        &mut self,
        tab_id: TabId,
        url: &str,
        headers: Option<&[ResponseHeader]>,
    ) -> ObserveOutcome {
        if tab_id < 0 {
            return ObserveOutcome::Ignored;
        }

        let size = extract_size(url, headers);
        let kind = self.policy.classify(url);

        let entry = self.entries.entry(tab_id).or_default();
        let candidate = Candidate {
            url: url.to_string(),
            size,
        };
        if entry.offer(kind, candidate) {
            tracing::info!(kind = kind.label(), tab_id, size, url, "best candidate updated");
            ObserveOutcome::Replaced { kind, size }
        } else {
            ObserveOutcome::Kept { kind }
        }
    }

    /// Drops all state for `tab_id`. Returns whether an entry existed.
    pub fn forget(&mut self, tab_id: TabId) -> bool {
        let removed = self.entries.remove(&tab_id).is_some();
        if removed {
            tracing::debug!(tab_id, "tab entry removed");
        }
        removed
    }

    /// Cloned view of the current candidates for `tab_id`.
    pub fn snapshot(&self, tab_id: TabId) -> Option<TabEntry> {
        self.entries.get(&tab_id).cloned()
    }

    /// Borrowing lookup.
    pub fn get(&self, tab_id: TabId) -> Option<&TabEntry> {
        self.entries.get(&tab_id)
    }

    /// Inserts or overwrites the entry for `tab_id` wholesale.
    pub fn upsert(&mut self, tab_id: TabId, entry: TabEntry) {
        self.entries.insert(tab_id, entry);
    }

    /// Same as [`forget`](Self::forget).
    pub fn delete(&mut self, tab_id: TabId) -> bool {
        self.forget(tab_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tracked tab ids in ascending order.
    pub fn tab_ids(&self) -> Vec<TabId> {
        let mut ids: Vec<TabId> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}
