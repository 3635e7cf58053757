//! URL normalization and save-name handling.
//!
//! Captured media URLs often carry a `range=` parameter restricting the
//! response to a byte window; a full-file download has to drop it. Requested
//! filenames are sanitized before they touch the filesystem.

mod range;
mod sanitize;

pub use range::strip_trailing_range;
pub use sanitize::{safe_filename, sanitize_filename};
