//! Normalization outcome attached to a short link at creation time.

use super::content_ref::ContentRef;

/// Which pipeline step degraded a normalization to the placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradeReason {
    /// No mirror could supply the source bytes.
    Fetch,
    /// Source bytes could not be decoded or re-encoded.
    Transcode,
    /// The publish backend rejected the still frame or was unreachable.
    Publish,
}

impl std::fmt::Display for DegradeReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fetch => write!(f, "fetch"),
            Self::Transcode => write!(f, "transcode"),
            Self::Publish => write!(f, "publish"),
        }
    }
}

/// Write-once result of normalizing a source reference.
///
/// Produced once per link creation and persisted by the caller; re-running
/// normalization produces a new value, it never patches history. `Degraded`
/// is terminal-success: the link still gets a usable preview reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizationResult {
    /// Source is static-compatible; the original reference is used as-is.
    PassThrough {
        /// The unchanged source reference.
        source: ContentRef,
    },
    /// A still frame was published; the new reference supersedes the source
    /// for preview purposes.
    Normalized {
        /// Content-addressed reference to the published PNG.
        new_ref: ContentRef,
    },
    /// The pipeline could not produce a live asset; a placeholder stands in.
    Degraded {
        /// Well-known placeholder reference.
        placeholder: ContentRef,
        /// Which step failed.
        reason: DegradeReason,
    },
}

impl NormalizationResult {
    /// Returns the reference to store and later serve.
    #[must_use]
    pub const fn effective_ref(&self) -> &ContentRef {
        match self {
            Self::PassThrough { source } => source,
            Self::Normalized { new_ref } => new_ref,
            Self::Degraded { placeholder, .. } => placeholder,
        }
    }

    /// Returns true if a new still frame was published.
    #[must_use]
    pub const fn is_normalized(&self) -> bool {
        matches!(self, Self::Normalized { .. })
    }

    /// Returns true if the pipeline fell back to the placeholder.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}
