//! Mirror endpoints and per-resolution probe diagnostics.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A single HTTP endpoint able to serve content by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorEndpoint {
    /// Base URL, including trailing path prefix (e.g. `https://ipfs.io/ipfs/`).
    pub base_url: String,
}

impl MirrorEndpoint {
    /// Creates an endpoint from a base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Joins the base URL with a content identifier.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl std::fmt::Display for MirrorEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.base_url)
    }
}

/// Ordered list of mirror endpoints, read-only after startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorSet {
    endpoints: Vec<MirrorEndpoint>,
}

impl MirrorSet {
    /// Builds a set from base URLs, preserving order.
    #[must_use]
    pub fn from_base_urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            endpoints: urls.into_iter().map(MirrorEndpoint::new).collect(),
        }
    }

    /// Returns the endpoints in configuration order.
    #[must_use]
    pub fn endpoints(&self) -> &[MirrorEndpoint] {
        &self.endpoints
    }

    /// Returns the number of configured mirrors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Returns true if no mirrors are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

/// Outcome of probing one mirror for one identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Mirror returned HTTP 200; the URL is servable.
    Reachable(String),
    /// Mirror errored or returned a non-success status.
    Unreachable,
    /// Mirror did not answer within the probe timeout.
    TimedOut,
}

impl std::fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reachable(url) => write!(f, "reachable ({url})"),
            Self::Unreachable => write!(f, "unreachable"),
            Self::TimedOut => write!(f, "timed out"),
        }
    }
}

/// Per-endpoint result of one resolution attempt. Ephemeral, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    /// The endpoint that was probed.
    pub endpoint: MirrorEndpoint,
    /// What happened.
    pub outcome: ProbeOutcome,
}

/// A URL that can be handed to the redirect/preview renderer verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServableUrl(String);

impl ServableUrl {
    /// Wraps a URL known to be servable.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Returns the URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the inner URL.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ServableUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Body and declared content type of a winning Fetch-mode response.
#[derive(Debug, Clone)]
pub struct FetchedContent {
    /// Raw body bytes.
    pub bytes: Bytes,
    /// `Content-Type` header of the winning response, if any.
    pub content_type: Option<String>,
    /// The mirror URL the body was fetched from.
    pub source_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join() {
        let endpoint = MirrorEndpoint::new("https://ipfs.io/ipfs/");
        assert_eq!(endpoint.url_for("bafy123"), "https://ipfs.io/ipfs/bafy123");
    }

    #[test]
    fn test_mirror_set_preserves_order() {
        let set = MirrorSet::from_base_urls(["https://a/", "https://b/"]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.endpoints()[0].base_url, "https://a/");
        assert_eq!(set.endpoints()[1].base_url, "https://b/");
    }

    #[test]
    fn test_empty_mirror_set() {
        let set = MirrorSet::from_base_urls(Vec::<String>::new());
        assert!(set.is_empty());
    }
}
