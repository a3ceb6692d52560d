//! MIME type classification.

use crate::domain::entities::MediaClass;

/// Maps a declared MIME type to its media class.
///
/// Total over all string inputs: unrecognized, empty, or malformed values
/// classify as [`MediaClass::Unknown`] and are served as-is without
/// transcoding. Matching is case-insensitive and ignores parameters
/// (`image/gif; foo=bar` classifies like `image/gif`).
#[must_use]
pub fn classify(mime: &str) -> MediaClass {
    let essence = mime
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match essence.as_str() {
        "image/png" | "image/jpeg" | "image/jpg" => MediaClass::StaticImage,
        "image/gif" => MediaClass::AnimatedImage,
        "video/mp4" | "video/webm" | "video/ogg" => MediaClass::MotionVideo,
        _ => MediaClass::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("image/png", MediaClass::StaticImage; "png")]
    #[test_case("image/jpeg", MediaClass::StaticImage; "jpeg")]
    #[test_case("image/jpg", MediaClass::StaticImage; "jpg alias")]
    #[test_case("image/gif", MediaClass::AnimatedImage; "gif")]
    #[test_case("video/mp4", MediaClass::MotionVideo; "mp4")]
    #[test_case("video/webm", MediaClass::MotionVideo; "webm")]
    #[test_case("video/ogg", MediaClass::MotionVideo; "ogg")]
    #[test_case("image/webp", MediaClass::Unknown; "webp unhandled")]
    #[test_case("application/pdf", MediaClass::Unknown; "non media")]
    #[test_case("", MediaClass::Unknown; "empty")]
    #[test_case("not a mime at all", MediaClass::Unknown; "garbage")]
    fn test_classify(mime: &str, expected: MediaClass) {
        assert_eq!(classify(mime), expected);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classify("Image/GIF"), MediaClass::AnimatedImage);
        assert_eq!(classify("VIDEO/MP4"), MediaClass::MotionVideo);
    }

    #[test]
    fn test_classify_ignores_parameters() {
        assert_eq!(classify("image/gif; foo=bar"), MediaClass::AnimatedImage);
        assert_eq!(classify(" image/png "), MediaClass::StaticImage);
    }

    #[test]
    fn test_needs_still_frame() {
        assert!(classify("image/gif").needs_still_frame());
        assert!(classify("video/mp4").needs_still_frame());
        assert!(!classify("image/png").needs_still_frame());
        assert!(!classify("text/html").needs_still_frame());
    }
}
