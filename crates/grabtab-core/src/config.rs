use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::events::RequestFilter;
use crate::media::{MarkerPolicy, DEFAULT_AUDIO_MARKERS};

/// Audio/video classification settings (optional `[classifier]` section).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Case-insensitive URL substrings that mark a request as audio.
    pub audio_markers: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            audio_markers: DEFAULT_AUDIO_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// Global configuration loaded from `~/.config/grabtab/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrabConfig {
    /// Substring a request's path or query must contain to be tracked.
    pub url_filter: String,
    /// Filename suggested for the best video stream.
    pub video_filename: String,
    /// Filename suggested for the best audio stream.
    pub audio_filename: String,
    /// Ask for a save location before each download.
    pub prompt_user: bool,
    /// Directory downloads are saved into (None = current directory).
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

impl Default for GrabConfig {
    fn default() -> Self {
        Self {
            url_filter: "videoplayback".to_string(),
            video_filename: "video.mp4".to_string(),
            audio_filename: "audio.mp4".to_string(),
            prompt_user: true,
            download_dir: None,
            classifier: ClassifierConfig::default(),
        }
    }
}

impl GrabConfig {
    pub fn classification_policy(&self) -> MarkerPolicy {
        MarkerPolicy::new(&self.classifier.audio_markers)
    }

    pub fn request_filter(&self) -> RequestFilter {
        RequestFilter::new(&self.url_filter)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("grabtab")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<GrabConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] with an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<GrabConfig> {
    if !path.exists() {
        let default_cfg = GrabConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write config: {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data =
        fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: GrabConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
