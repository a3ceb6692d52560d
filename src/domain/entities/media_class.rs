//! Media classification of declared MIME types.

/// Coarse media class derived from a MIME string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaClass {
    /// Single-frame raster image, usable as a preview directly.
    StaticImage,
    /// Multi-frame image format; needs a still frame extracted.
    AnimatedImage,
    /// Video container; needs a still frame extracted.
    MotionVideo,
    /// Anything else. Treated as static-compatible passthrough.
    Unknown,
}

impl MediaClass {
    /// Returns true if content of this class needs transcoding to a still
    /// frame before it can serve as a preview.
    #[must_use]
    pub const fn needs_still_frame(self) -> bool {
        matches!(self, Self::AnimatedImage | Self::MotionVideo)
    }
}

impl std::fmt::Display for MediaClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StaticImage => write!(f, "static-image"),
            Self::AnimatedImage => write!(f, "animated-image"),
            Self::MotionVideo => write!(f, "motion-video"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}
