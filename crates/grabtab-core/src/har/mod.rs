//! HAR (HTTP Archive) capture replay.
//!
//! A HAR exported from browser devtools records every request a page made,
//! with response headers. Replaying it yields the same observation feed a
//! live browser would deliver, so captures can be inspected and downloaded
//! offline.

mod parse;
mod replay;

pub use replay::{capture_from_slice, load_capture};
