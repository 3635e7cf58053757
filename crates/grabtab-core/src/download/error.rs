//! Download initiation error type.

use thiserror::Error;

/// Why a host could not start (or finish) a requested download.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The user dismissed the save-location prompt.
    #[error("save prompt cancelled for {0}")]
    Cancelled(String),
    /// The host refused the request outright.
    #[error("download rejected by host: {0}")]
    Rejected(String),
    /// Server answered with a non-2xx status.
    #[error("HTTP {status} from {url}")]
    Http { url: String, status: u32 },
    /// libcurl reported an error (connect, timeout, invalid URL, ...).
    #[error("transfer failed: {0}")]
    Curl(#[from] curl::Error),
    /// Writing the destination file failed.
    #[error("storage: {0}")]
    Io(#[from] std::io::Error),
}
