//! Audio/video classification policies.

use super::MediaKind;

/// Markers that identify an audio stream in the default policy.
///
/// `itag=140` is the Google/YouTube AAC audio format code; other platforms
/// will not use it.
pub const DEFAULT_AUDIO_MARKERS: &[&str] = &["mime=audio", "audio/mp4", "itag=140"];

/// Decides whether an observed request URL is an audio or a video stream.
pub trait ClassificationPolicy: Send + Sync {
    fn classify(&self, url: &str) -> MediaKind;
}

/// Substring heuristic over the lowercased URL.
///
/// A URL containing any marker is audio, everything else is video. This is
/// not a content-type parse; misclassification is possible and accepted.
#[derive(Debug, Clone)]
pub struct MarkerPolicy {
    markers: Vec<String>,
}

impl MarkerPolicy {
    /// Builds a policy from the given markers. Markers are lowercased once
    /// here; empty markers are dropped so they cannot match every URL.
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let markers = markers
            .into_iter()
            .map(|m| m.as_ref().to_lowercase())
            .filter(|m| !m.is_empty())
            .collect();
        Self { markers }
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }
}

impl Default for MarkerPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_AUDIO_MARKERS)
    }
}

impl ClassificationPolicy for MarkerPolicy {
    fn classify(&self, url: &str) -> MediaKind {
        let lower = url.to_lowercase();
        if self.markers.iter().any(|m| lower.contains(m.as_str())) {
            MediaKind::Audio
        } else {
            MediaKind::Video
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_audio_is_audio() {
        let p = MarkerPolicy::default();
        assert_eq!(
            p.classify("https://r1.example.com/videoplayback?mime=audio%2Fwebm&clen=10"),
            MediaKind::Audio
        );
    }

    #[test]
    fn itag_140_is_audio() {
        let p = MarkerPolicy::default();
        assert_eq!(
            p.classify("https://r1.example.com/videoplayback?itag=140&clen=10"),
            MediaKind::Audio
        );
    }

    #[test]
    fn itag_18_is_video() {
        let p = MarkerPolicy::default();
        assert_eq!(
            p.classify("https://r1.example.com/videoplayback?itag=18&clen=2000"),
            MediaKind::Video
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        let p = MarkerPolicy::default();
        assert_eq!(
            p.classify("https://x/videoplayback?MIME=Audio%2Fmp4"),
            MediaKind::Audio
        );
        assert_eq!(p.classify("https://x/videoplayback?type=AUDIO/MP4"), MediaKind::Audio);
    }

    #[test]
    fn custom_markers_replace_defaults() {
        let p = MarkerPolicy::new(["Kind=Sound", ""]);
        assert_eq!(p.markers(), ["kind=sound".to_string()]);
        assert_eq!(p.classify("https://x/videoplayback?kind=sound"), MediaKind::Audio);
        assert_eq!(p.classify("https://x/videoplayback?itag=140"), MediaKind::Video);
    }
}
