//! Content retrieval over the mirror network.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::application::services::GatewayResolver;
use crate::domain::errors::FetchError;
use crate::domain::ports::ContentFetchPort;

/// Fetches raw content bytes by identifier, racing all mirrors.
///
/// Thin composition over [`GatewayResolver`] Fetch mode; exists so the
/// normalizer depends on the [`ContentFetchPort`] seam rather than the
/// resolver directly.
pub struct ContentFetcher {
    resolver: Arc<GatewayResolver>,
}

impl ContentFetcher {
    /// Creates a fetcher over the given resolver.
    #[must_use]
    pub const fn new(resolver: Arc<GatewayResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl ContentFetchPort for ContentFetcher {
    async fn fetch(&self, identifier: &str) -> Result<Bytes, FetchError> {
        let content = self
            .resolver
            .fetch(identifier)
            .await
            .map_err(FetchError::Unavailable)?;

        Ok(content.bytes)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::*;
    use crate::domain::entities::MirrorSet;
    use crate::domain::ports::mocks::{MirrorScript, MockMirrorProber};

    fn fetcher(prober: MockMirrorProber, mirrors: MirrorSet) -> ContentFetcher {
        let resolver = Arc::new(GatewayResolver::new(
            mirrors,
            Arc::new(prober),
            Duration::from_millis(500),
        ));
        ContentFetcher::new(resolver)
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_returns_bytes() {
        let mirrors = MirrorSet::from_base_urls(["https://a/"]);
        let scripts = HashMap::from([(
            "https://a/".to_string(),
            MirrorScript::SucceedAfter(Duration::from_millis(1)),
        )]);
        let prober = MockMirrorProber::new(scripts).with_body(&b"content"[..]);

        let bytes = fetcher(prober, mirrors).fetch("bafy123").await.unwrap();
        assert_eq!(&bytes[..], b"content");
    }

    #[tokio::test]
    async fn test_exhaustion_maps_to_unavailable() {
        let mirrors = MirrorSet::from_base_urls(["https://a/", "https://b/"]);
        let prober = MockMirrorProber::all_failing();

        let err = fetcher(prober, mirrors).fetch("bafy123").await.unwrap_err();
        assert!(matches!(err, FetchError::Unavailable(_)));
        assert!(err.is_recoverable());
    }
}
