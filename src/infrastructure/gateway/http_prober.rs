//! HTTP adapter for mirror probing.

use async_trait::async_trait;
use reqwest::Client;
use tracing::trace;

use crate::domain::entities::{FetchedContent, MirrorEndpoint};
use crate::domain::ports::{MirrorProbePort, ProbeFailure};

/// Probes mirrors over HTTP: HEAD for existence checks, GET for bodies.
///
/// The per-request deadline is enforced by the resolver; the client carries
/// its own slightly larger timeout as a backstop against stalled bodies.
pub struct HttpMirrorProber {
    client: Client,
}

impl HttpMirrorProber {
    /// Creates a prober with its own HTTP client.
    ///
    /// # Errors
    /// Returns [`ProbeFailure::Unreachable`] if the client cannot be built.
    pub fn new(client_timeout: std::time::Duration) -> Result<Self, ProbeFailure> {
        let client = Client::builder()
            .timeout(client_timeout)
            .build()
            .map_err(|e| ProbeFailure::unreachable(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    fn map_error(e: &reqwest::Error) -> ProbeFailure {
        if e.is_timeout() {
            ProbeFailure::TimedOut
        } else if e.is_connect() {
            ProbeFailure::unreachable("connection failed")
        } else {
            ProbeFailure::unreachable(e.to_string())
        }
    }
}

#[async_trait]
impl MirrorProbePort for HttpMirrorProber {
    async fn probe(&self, endpoint: &MirrorEndpoint, path: &str) -> Result<(), ProbeFailure> {
        let url = endpoint.url_for(path);
        trace!(url = %url, "HEAD probe");

        let response = self
            .client
            .head(&url)
            .send()
            .await
            .map_err(|e| Self::map_error(&e))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ProbeFailure::unreachable(format!(
                "HTTP {}",
                response.status()
            )))
        }
    }

    async fn fetch(
        &self,
        endpoint: &MirrorEndpoint,
        path: &str,
    ) -> Result<FetchedContent, ProbeFailure> {
        let url = endpoint.url_for(path);
        trace!(url = %url, "GET fetch");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Self::map_error(&e))?;

        if !response.status().is_success() {
            return Err(ProbeFailure::unreachable(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProbeFailure::unreachable(format!("failed to read body: {e}")))?;

        Ok(FetchedContent {
            bytes,
            content_type,
            source_url: url,
        })
    }
}

impl std::fmt::Debug for HttpMirrorProber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpMirrorProber").finish_non_exhaustive()
    }
}
