//! Per-tab candidate types.

use serde::Serialize;

use crate::media::MediaKind;

/// Identifier of a host browsing context. Negative ids are non-tab contexts.
pub type TabId = i64;

/// One observed media stream and its best-known byte size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub url: String,
    pub size: u64,
}

/// Best-known video and audio candidates for a single tab.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TabEntry {
    pub video: Option<Candidate>,
    pub audio: Option<Candidate>,
}

impl TabEntry {
    pub fn get(&self, kind: MediaKind) -> Option<&Candidate> {
        match kind {
            MediaKind::Video => self.video.as_ref(),
            MediaKind::Audio => self.audio.as_ref(),
        }
    }

    /// True when neither kind has been captured.
    pub fn is_empty(&self) -> bool {
        self.video.is_none() && self.audio.is_none()
    }

    /// Replaces the candidate for `kind` if `candidate` is strictly larger
    /// (or none exists). Returns whether a replacement happened.
    pub(super) fn offer(&mut self, kind: MediaKind, candidate: Candidate) -> bool {
        let slot = match kind {
            MediaKind::Video => &mut self.video,
            MediaKind::Audio => &mut self.audio,
        };
        let replace = slot
            .as_ref()
            .map_or(true, |current| candidate.size > current.size);
        if replace {
            *slot = Some(candidate);
        }
        replace
    }
}
