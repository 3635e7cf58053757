//! Media request inspection: classify a request as audio or video and
//! extract its best-known byte size.

mod classify;
mod size;

pub use classify::{ClassificationPolicy, MarkerPolicy, DEFAULT_AUDIO_MARKERS};
pub use size::{extract_size, parse_leading_int, size_from_clen, size_from_headers, ResponseHeader};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of media stream a request carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Audio,
}

impl MediaKind {
    /// Upper-case tag used in log lines and tables.
    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Video => "VIDEO",
            MediaKind::Audio => "AUDIO",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
        })
    }
}
