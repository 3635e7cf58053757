pub mod config;
pub mod logging;

pub mod download;
pub mod events;
pub mod har;
pub mod media;
pub mod tracker;
pub mod url_model;
