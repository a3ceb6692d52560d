//! Content reference value object.

use serde::{Deserialize, Serialize};

/// How a [`ContentRef`] path is to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RefScheme {
    /// An opaque content identifier; only fetchable through a mirror.
    RawIdentifier,
    /// A plain URL, already servable as-is.
    ExternalUrl,
}

/// Reference to a piece of content, content-addressed or not.
///
/// Immutable once created; stored alongside the short link it enriches.
/// A `RawIdentifier` ref is not itself a URL and must never be dereferenced
/// except through the gateway resolver or content fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRef {
    /// Path interpretation.
    pub scheme: RefScheme,
    /// Content identifier or URL.
    pub path: String,
    /// Declared MIME type.
    pub mime: String,
}

impl ContentRef {
    /// Creates a reference to content-addressed data.
    #[must_use]
    pub fn raw(path: impl Into<String>, mime: impl Into<String>) -> Self {
        Self {
            scheme: RefScheme::RawIdentifier,
            path: path.into(),
            mime: mime.into(),
        }
    }

    /// Creates a reference to an external URL.
    #[must_use]
    pub fn external(url: impl Into<String>, mime: impl Into<String>) -> Self {
        Self {
            scheme: RefScheme::ExternalUrl,
            path: url.into(),
            mime: mime.into(),
        }
    }

    /// Returns true if the path is a raw content identifier.
    #[must_use]
    pub const fn is_content_addressed(&self) -> bool {
        matches!(self.scheme, RefScheme::RawIdentifier)
    }
}

impl std::fmt::Display for ContentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.scheme {
            RefScheme::RawIdentifier => write!(f, "cid:{}", self.path),
            RefScheme::ExternalUrl => write!(f, "{}", self.path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_ref_is_content_addressed() {
        let r = ContentRef::raw("bafy123", "image/png");
        assert!(r.is_content_addressed());
        assert_eq!(r.path, "bafy123");
        assert_eq!(r.mime, "image/png");
    }

    #[test]
    fn test_external_ref_is_not_content_addressed() {
        let r = ContentRef::external("https://example.com/a.png", "image/png");
        assert!(!r.is_content_addressed());
    }

    #[test]
    fn test_display_prefixes_raw_identifiers() {
        let r = ContentRef::raw("bafy123", "image/png");
        assert_eq!(r.to_string(), "cid:bafy123");

        let e = ContentRef::external("https://example.com/a.png", "image/png");
        assert_eq!(e.to_string(), "https://example.com/a.png");
    }
}
