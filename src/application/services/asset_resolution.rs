//! Serve-time asset resolution.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::services::GatewayResolver;
use crate::domain::entities::{ContentRef, RefScheme, ServableUrl};

/// Resolves a stored asset reference to a URL the redirect page can embed.
///
/// Infallible by design: when the mirror network cannot produce a live URL
/// the well-known placeholder is returned instead. Called once per redirect
/// render, with no caching of prior outcomes; mirror availability can
/// change between link creation and each view.
pub struct AssetResolutionService {
    resolver: Arc<GatewayResolver>,
    placeholder_url: String,
}

impl AssetResolutionService {
    /// Creates a service over the given resolver and placeholder URL.
    #[must_use]
    pub fn new(resolver: Arc<GatewayResolver>, placeholder_url: impl Into<String>) -> Self {
        Self {
            resolver,
            placeholder_url: placeholder_url.into(),
        }
    }

    /// Returns a servable URL for `content`, or the placeholder.
    ///
    /// External URLs pass through verbatim. Raw identifiers are probed
    /// across the mirror set; only `image/*` content is worth a probe, since
    /// the preview page cannot embed anything else.
    pub async fn resolve_for_display(&self, content: &ContentRef) -> ServableUrl {
        match content.scheme {
            RefScheme::ExternalUrl => ServableUrl::new(content.path.clone()),
            RefScheme::RawIdentifier => {
                if !content.mime.starts_with("image/") {
                    debug!(mime = %content.mime, "Non-image content, serving placeholder");
                    return self.placeholder();
                }

                match self.resolver.resolve(&content.path).await {
                    Ok(url) => url,
                    Err(err) => {
                        warn!(
                            path = %content.path,
                            attempts = err.attempts().len(),
                            timed_out = err.timed_out_count(),
                            "All mirrors exhausted, serving placeholder"
                        );
                        self.placeholder()
                    }
                }
            }
        }
    }

    /// Returns the well-known placeholder URL.
    #[must_use]
    pub fn placeholder(&self) -> ServableUrl {
        ServableUrl::new(self.placeholder_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::*;
    use crate::domain::entities::MirrorSet;
    use crate::domain::ports::mocks::{MirrorScript, MockMirrorProber};

    const PLACEHOLDER: &str = "/images/preview-not-found.svg";
    const TIMEOUT: Duration = Duration::from_millis(500);

    fn service(scripts: Vec<(&str, MirrorScript)>) -> AssetResolutionService {
        let mirrors = MirrorSet::from_base_urls(scripts.iter().map(|(url, _)| (*url).to_string()));
        let scripts: HashMap<String, MirrorScript> = scripts
            .into_iter()
            .map(|(url, script)| (url.to_string(), script))
            .collect();
        let resolver = Arc::new(GatewayResolver::new(
            mirrors,
            Arc::new(MockMirrorProber::new(scripts)),
            TIMEOUT,
        ));
        AssetResolutionService::new(resolver, PLACEHOLDER)
    }

    #[tokio::test]
    async fn test_external_url_passes_through_verbatim() {
        let service = service(vec![("https://a/", MirrorScript::FailFast)]);
        let content = ContentRef::external("https://example.com/a.png", "image/png");

        let url = service.resolve_for_display(&content).await;
        assert_eq!(url.as_str(), "https://example.com/a.png");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reachable_identifier_resolves_to_mirror_url() {
        let service = service(vec![(
            "https://a/",
            MirrorScript::SucceedAfter(Duration::from_millis(5)),
        )]);
        let content = ContentRef::raw("bafy123", "image/png");

        let url = service.resolve_for_display(&content).await;
        assert_eq!(url.as_str(), "https://a/bafy123");
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_degrades_to_placeholder() {
        let service = service(vec![
            ("https://a/", MirrorScript::FailFast),
            ("https://b/", MirrorScript::Hang),
        ]);
        let content = ContentRef::raw("bafy999", "image/png");

        let started = tokio::time::Instant::now();
        let url = service.resolve_for_display(&content).await;
        let elapsed = started.elapsed();

        assert_eq!(url.as_str(), PLACEHOLDER);
        // Degradation is bounded by a single timeout period, never a hang.
        assert!(elapsed < TIMEOUT * 2);
    }

    #[tokio::test]
    async fn test_non_image_mime_skips_the_probe() {
        // Every mirror would answer instantly; the placeholder proves no
        // probe was issued.
        let service = service(vec![(
            "https://a/",
            MirrorScript::SucceedAfter(Duration::ZERO),
        )]);
        let content = ContentRef::raw("bafy123", "video/mp4");

        let url = service.resolve_for_display(&content).await;
        assert_eq!(url.as_str(), PLACEHOLDER);
    }
}
