//! Port definition for probing a single mirror.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::{FetchedContent, MirrorEndpoint};

/// Failure of one request against one mirror.
#[derive(Debug, Clone, Error)]
pub enum ProbeFailure {
    /// Transport error or non-success status.
    #[error("unreachable: {message}")]
    Unreachable {
        /// Transport or status detail.
        message: String,
    },
    /// The mirror did not answer in time.
    #[error("timed out")]
    TimedOut,
}

impl ProbeFailure {
    /// Creates an unreachable failure.
    #[must_use]
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable {
            message: message.into(),
        }
    }
}

/// Port for issuing one request against one mirror endpoint.
///
/// Each call is a pure function of `(endpoint, path)`; implementations hold
/// no per-call mutable state and must be safe to invoke concurrently, since
/// the resolver races one call per mirror.
#[async_trait]
pub trait MirrorProbePort: Send + Sync {
    /// Lightweight existence check, no body transfer.
    async fn probe(&self, endpoint: &MirrorEndpoint, path: &str) -> Result<(), ProbeFailure>;

    /// Full retrieval of the body and declared content type.
    async fn fetch(
        &self,
        endpoint: &MirrorEndpoint,
        path: &str,
    ) -> Result<FetchedContent, ProbeFailure>;
}

#[cfg(test)]
pub mod mock {
    use std::collections::HashMap;
    use std::time::Duration;

    use bytes::Bytes;

    use super::*;

    /// Scripted behavior for one mirror endpoint.
    #[derive(Debug, Clone)]
    pub enum MirrorScript {
        /// Succeed after the given delay.
        SucceedAfter(Duration),
        /// Fail immediately.
        FailFast,
        /// Never answer; the resolver's timeout has to fire.
        Hang,
    }

    /// Mock prober driven by a per-endpoint script.
    ///
    /// Endpoints without a script fail fast.
    pub struct MockMirrorProber {
        scripts: HashMap<String, MirrorScript>,
        body: Bytes,
    }

    impl MockMirrorProber {
        /// Creates a mock with the given per-base-URL scripts.
        pub fn new(scripts: HashMap<String, MirrorScript>) -> Self {
            Self {
                scripts,
                body: Bytes::from_static(b"mock-body"),
            }
        }

        /// Creates a mock where every endpoint fails fast.
        pub fn all_failing() -> Self {
            Self::new(HashMap::new())
        }

        /// Sets the body returned by successful fetches.
        pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
            self.body = body.into();
            self
        }

        async fn run_script(&self, endpoint: &MirrorEndpoint) -> Result<(), ProbeFailure> {
            match self.scripts.get(&endpoint.base_url) {
                Some(MirrorScript::SucceedAfter(delay)) => {
                    tokio::time::sleep(*delay).await;
                    Ok(())
                }
                Some(MirrorScript::Hang) => {
                    // Far longer than any test timeout.
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Err(ProbeFailure::TimedOut)
                }
                Some(MirrorScript::FailFast) | None => {
                    Err(ProbeFailure::unreachable("scripted failure"))
                }
            }
        }
    }

    #[async_trait]
    impl MirrorProbePort for MockMirrorProber {
        async fn probe(&self, endpoint: &MirrorEndpoint, _path: &str) -> Result<(), ProbeFailure> {
            self.run_script(endpoint).await
        }

        async fn fetch(
            &self,
            endpoint: &MirrorEndpoint,
            path: &str,
        ) -> Result<FetchedContent, ProbeFailure> {
            self.run_script(endpoint).await?;
            Ok(FetchedContent {
                bytes: self.body.clone(),
                content_type: Some("application/octet-stream".to_string()),
                source_url: endpoint.url_for(path),
            })
        }
    }
}
