//! Download trigger and the outbound download capability.
//!
//! The trigger reads a tab's best candidates, strips byte-range parameters,
//! and asks a [`DownloadHost`] to fetch each stream to a fixed filename. The
//! host owns the transfer from then on; failures are logged per stream and
//! never block the sibling request.

mod curl_host;
mod error;
mod trigger;

pub use curl_host::{CurlHost, FixedDir, SaveLocation, TransferResult, TransferSummary};
pub use error::DownloadError;
pub use trigger::{
    activate, execute_plan, plan_activation, ActivationPlan, ActivationReport, DownloadAttempt,
    Skipped,
};

use std::future::Future;
use std::path::PathBuf;

use crate::config::GrabConfig;
use crate::media::MediaKind;

/// What the trigger asks the host to download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub filename: String,
    /// Ask the user where to save before starting.
    pub prompt_user: bool,
}

/// Acknowledgement that a download is underway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadStarted {
    pub id: u64,
    /// Where the host is writing (or would write) the file.
    pub target: PathBuf,
}

/// Outbound download capability provided by the host platform.
pub trait DownloadHost: Send + Sync {
    /// Initiates a download and resolves once it has started.
    fn download(
        &self,
        request: DownloadRequest,
    ) -> impl Future<Output = Result<DownloadStarted, DownloadError>> + Send;
}

/// Filenames and prompting used for triggered downloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOptions {
    pub video_filename: String,
    pub audio_filename: String,
    pub prompt_user: bool,
}

impl DownloadOptions {
    pub fn filename(&self, kind: MediaKind) -> &str {
        match kind {
            MediaKind::Video => &self.video_filename,
            MediaKind::Audio => &self.audio_filename,
        }
    }
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            video_filename: "video.mp4".to_string(),
            audio_filename: "audio.mp4".to_string(),
            prompt_user: true,
        }
    }
}

impl From<&GrabConfig> for DownloadOptions {
    fn from(cfg: &GrabConfig) -> Self {
        Self {
            video_filename: cfg.video_filename.clone(),
            audio_filename: cfg.audio_filename.clone(),
            prompt_user: cfg.prompt_user,
        }
    }
}
