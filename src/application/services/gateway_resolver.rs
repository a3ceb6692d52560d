//! Concurrent mirror resolution.
//!
//! Races one request per configured mirror and settles on the first
//! success. Per-probe timeouts bound worst-case latency to a single timeout
//! period regardless of mirror count.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::FuturesUnordered;
use futures_util::StreamExt;
use tracing::{debug, info};

use crate::domain::entities::{
    FetchedContent, MirrorEndpoint, MirrorSet, ProbeOutcome, ProbeResult, ServableUrl,
};
use crate::domain::errors::ResolutionError;
use crate::domain::ports::{MirrorProbePort, ProbeFailure};

/// Races probes across a mirror set for one identifier at a time.
///
/// Holds no mutable state; a resolver can be shared freely across
/// concurrent resolutions.
pub struct GatewayResolver {
    mirrors: MirrorSet,
    prober: Arc<dyn MirrorProbePort>,
    probe_timeout: Duration,
}

impl GatewayResolver {
    /// Creates a resolver over the given mirrors.
    #[must_use]
    pub fn new(mirrors: MirrorSet, prober: Arc<dyn MirrorProbePort>, probe_timeout: Duration) -> Self {
        Self {
            mirrors,
            prober,
            probe_timeout,
        }
    }

    /// Returns the configured per-probe timeout.
    #[must_use]
    pub const fn probe_timeout(&self) -> Duration {
        self.probe_timeout
    }

    /// Probe mode: finds a mirror currently serving `path`.
    ///
    /// Issues a lightweight existence check against every mirror
    /// concurrently; the first to confirm wins. No retries within a call:
    /// the operation is idempotent and callers needing another attempt
    /// simply call again.
    ///
    /// # Errors
    /// Returns [`ResolutionError::AllMirrorsExhausted`] with per-endpoint
    /// outcomes if no mirror answers in time.
    pub async fn resolve(&self, path: &str) -> Result<ServableUrl, ResolutionError> {
        let url = self
            .race(path, |prober, endpoint, path| async move {
                prober.probe(&endpoint, &path).await?;
                Ok(ServableUrl::new(endpoint.url_for(&path)))
            })
            .await?;

        info!(path = %path, url = %url, "Resolved identifier to mirror URL");
        Ok(url)
    }

    /// Fetch mode: retrieves the body of `path` from the fastest mirror.
    ///
    /// Same fan-out race as [`resolve`](Self::resolve), but the winning
    /// response's body and declared content type are returned.
    ///
    /// # Errors
    /// Returns [`ResolutionError::AllMirrorsExhausted`] if no mirror
    /// delivers a body in time.
    pub async fn fetch(&self, path: &str) -> Result<FetchedContent, ResolutionError> {
        let content = self
            .race(path, |prober, endpoint, path| async move {
                prober.fetch(&endpoint, &path).await
            })
            .await?;

        info!(
            path = %path,
            url = %content.source_url,
            size = content.bytes.len(),
            "Fetched identifier body from mirror"
        );
        Ok(content)
    }

    /// Diagnostic sweep: probes every mirror to completion, no early winner.
    ///
    /// Unlike the racing modes this waits for all outcomes, so it costs a
    /// full timeout period when any mirror is down. Used by operational
    /// tooling, never on the serving path.
    pub async fn survey(&self, path: &str) -> Vec<ProbeResult> {
        let mut in_flight = FuturesUnordered::new();
        for endpoint in self.mirrors.endpoints() {
            let prober = self.prober.clone();
            let endpoint = endpoint.clone();
            let path = path.to_string();
            let timeout = self.probe_timeout;
            in_flight.push(async move {
                let outcome =
                    match tokio::time::timeout(timeout, prober.probe(&endpoint, &path)).await {
                        Ok(Ok(())) => ProbeOutcome::Reachable(endpoint.url_for(&path)),
                        Ok(Err(failure)) => failure_outcome(failure),
                        Err(_) => ProbeOutcome::TimedOut,
                    };
                ProbeResult { endpoint, outcome }
            });
        }

        let mut results: Vec<ProbeResult> = in_flight.collect().await;
        results.sort_by(|a, b| a.endpoint.base_url.cmp(&b.endpoint.base_url));
        results
    }

    /// Shared fan-out machinery for both modes.
    ///
    /// First completed success wins; dropping the remaining futures is the
    /// advisory cancellation of the losers. Losers' outcomes are collected
    /// for the exhaustion diagnostics.
    async fn race<T, F, Fut>(&self, path: &str, attempt: F) -> Result<T, ResolutionError>
    where
        F: Fn(Arc<dyn MirrorProbePort>, MirrorEndpoint, String) -> Fut,
        Fut: Future<Output = Result<T, ProbeFailure>>,
    {
        if self.mirrors.is_empty() {
            return Err(ResolutionError::NoMirrorsConfigured);
        }

        let mut in_flight = FuturesUnordered::new();
        for endpoint in self.mirrors.endpoints() {
            let fut = attempt(self.prober.clone(), endpoint.clone(), path.to_string());
            let endpoint = endpoint.clone();
            let timeout = self.probe_timeout;
            in_flight.push(async move {
                match tokio::time::timeout(timeout, fut).await {
                    Ok(result) => (endpoint, result),
                    Err(_) => (endpoint, Err(ProbeFailure::TimedOut)),
                }
            });
        }

        let mut attempts = Vec::with_capacity(self.mirrors.len());
        while let Some((endpoint, result)) = in_flight.next().await {
            match result {
                Ok(value) => {
                    debug!(path = %path, mirror = %endpoint, "Mirror won the race");
                    return Ok(value);
                }
                Err(failure) => {
                    debug!(path = %path, mirror = %endpoint, outcome = %failure, "Mirror lost the race");
                    attempts.push(ProbeResult {
                        endpoint,
                        outcome: failure_outcome(failure),
                    });
                }
            }
        }

        Err(ResolutionError::exhausted(attempts))
    }
}

impl std::fmt::Debug for GatewayResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayResolver")
            .field("mirrors", &self.mirrors.len())
            .field("probe_timeout", &self.probe_timeout)
            .finish_non_exhaustive()
    }
}

fn failure_outcome(failure: ProbeFailure) -> ProbeOutcome {
    match failure {
        ProbeFailure::Unreachable { .. } => ProbeOutcome::Unreachable,
        ProbeFailure::TimedOut => ProbeOutcome::TimedOut,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::domain::ports::mocks::{MirrorScript, MockMirrorProber};

    const TIMEOUT: Duration = Duration::from_millis(500);

    fn resolver_with(scripts: Vec<(&str, MirrorScript)>) -> GatewayResolver {
        let mirrors = MirrorSet::from_base_urls(scripts.iter().map(|(url, _)| (*url).to_string()));
        let scripts: HashMap<String, MirrorScript> = scripts
            .into_iter()
            .map(|(url, script)| (url.to_string(), script))
            .collect();
        GatewayResolver::new(mirrors, Arc::new(MockMirrorProber::new(scripts)), TIMEOUT)
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_success_wins_with_bounded_latency() {
        let resolver = resolver_with(vec![
            ("https://a/", MirrorScript::FailFast),
            ("https://b/", MirrorScript::SucceedAfter(Duration::from_millis(50))),
            ("https://c/", MirrorScript::Hang),
        ]);

        let started = tokio::time::Instant::now();
        let url = resolver.resolve("bafy123").await.unwrap();
        let elapsed = started.elapsed();

        assert_eq!(url.as_str(), "https://b/bafy123");
        // Parallel race: latency tracks the winner's delay, not the sum of
        // timeouts.
        assert!(elapsed >= Duration::from_millis(50));
        assert!(elapsed < Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_completion_order_beats_list_order() {
        let resolver = resolver_with(vec![
            ("https://slow/", MirrorScript::SucceedAfter(Duration::from_millis(200))),
            ("https://fast/", MirrorScript::SucceedAfter(Duration::from_millis(10))),
        ]);

        let url = resolver.resolve("bafy123").await.unwrap();
        assert_eq!(url.as_str(), "https://fast/bafy123");
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_carries_all_outcomes() {
        let resolver = resolver_with(vec![
            ("https://a/", MirrorScript::FailFast),
            ("https://b/", MirrorScript::FailFast),
            ("https://c/", MirrorScript::Hang),
        ]);

        let err = resolver.resolve("bafy123").await.unwrap_err();
        assert_eq!(err.attempts().len(), 3);
        assert_eq!(err.timed_out_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_latency_is_one_timeout_period() {
        let resolver = resolver_with(vec![
            ("https://a/", MirrorScript::Hang),
            ("https://b/", MirrorScript::Hang),
            ("https://c/", MirrorScript::Hang),
        ]);

        let started = tokio::time::Instant::now();
        let err = resolver.resolve("bafy123").await.unwrap_err();
        let elapsed = started.elapsed();

        assert_eq!(err.timed_out_count(), 3);
        assert!(elapsed >= TIMEOUT);
        assert!(elapsed < TIMEOUT * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_returns_winning_body() {
        let mirrors = MirrorSet::from_base_urls(["https://a/"]);
        let scripts = HashMap::from([(
            "https://a/".to_string(),
            MirrorScript::SucceedAfter(Duration::from_millis(1)),
        )]);
        let prober = MockMirrorProber::new(scripts).with_body(&b"gif-bytes"[..]);
        let resolver = GatewayResolver::new(mirrors, Arc::new(prober), TIMEOUT);

        let content = resolver.fetch("bafy123").await.unwrap();
        assert_eq!(&content.bytes[..], b"gif-bytes");
        assert_eq!(content.source_url, "https://a/bafy123");
    }

    #[tokio::test]
    async fn test_empty_mirror_set_is_an_error() {
        let resolver = GatewayResolver::new(
            MirrorSet::from_base_urls(Vec::<String>::new()),
            Arc::new(MockMirrorProber::all_failing()),
            TIMEOUT,
        );

        let err = resolver.resolve("bafy123").await.unwrap_err();
        assert!(matches!(err, ResolutionError::NoMirrorsConfigured));
    }

    #[tokio::test(start_paused = true)]
    async fn test_survey_reports_every_mirror() {
        let resolver = resolver_with(vec![
            ("https://a/", MirrorScript::SucceedAfter(Duration::from_millis(5))),
            ("https://b/", MirrorScript::FailFast),
            ("https://c/", MirrorScript::Hang),
        ]);

        let results = resolver.survey("bafy123").await;
        assert_eq!(results.len(), 3);
        assert_eq!(
            results[0].outcome,
            ProbeOutcome::Reachable("https://a/bafy123".to_string())
        );
        assert_eq!(results[1].outcome, ProbeOutcome::Unreachable);
        assert_eq!(results[2].outcome, ProbeOutcome::TimedOut);
    }
}
