//! Shared helpers for integration tests.

pub mod media_server;
