//! Request filter for the observation feed (`*://*/*videoplayback*`).

/// Matches requests whose URL path or query contains a fixed needle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFilter {
    needle: String,
}

impl RequestFilter {
    pub fn new(needle: impl Into<String>) -> Self {
        Self {
            needle: needle.into(),
        }
    }

    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// True if `url` is an http(s) URL with a host whose path or query
    /// contains the needle. The host name itself is never matched.
    pub fn matches(&self, url: &str) -> bool {
        let Ok(parsed) = url::Url::parse(url) else {
            return false;
        };
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return false;
        }
        if parsed.path().contains(self.needle.as_str()) {
            return true;
        }
        parsed
            .query()
            .is_some_and(|q| q.contains(self.needle.as_str()))
    }
}

impl Default for RequestFilter {
    fn default() -> Self {
        Self::new("videoplayback")
    }
}
