//! Thumbnail normalization use case.

use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::domain::entities::{ContentRef, DegradeReason, NormalizationResult};
use crate::domain::errors::PublishError;
use crate::domain::ports::{ContentFetchPort, PublishPort, TranscodePort};
use crate::domain::services::classify;

/// Default number of immediate publish retries after a failed attempt.
const DEFAULT_PUBLISH_RETRIES: u32 = 1;

/// Normalizes a source reference into a preview-ready one.
///
/// Runs once per link creation. Animated and video sources are reduced to a
/// published still frame; everything else passes through untouched. Every
/// failure branch degrades to the placeholder; link creation never fails on
/// account of a thumbnail.
pub struct NormalizeThumbnailUseCase {
    fetcher: Arc<dyn ContentFetchPort>,
    transcoder: Arc<dyn TranscodePort>,
    publisher: Arc<dyn PublishPort>,
    placeholder: ContentRef,
    publish_retries: u32,
}

impl NormalizeThumbnailUseCase {
    /// Creates the use case over its three capability ports.
    #[must_use]
    pub fn new(
        fetcher: Arc<dyn ContentFetchPort>,
        transcoder: Arc<dyn TranscodePort>,
        publisher: Arc<dyn PublishPort>,
        placeholder_url: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            transcoder,
            publisher,
            placeholder: ContentRef::external(placeholder_url, "image/svg+xml"),
            publish_retries: DEFAULT_PUBLISH_RETRIES,
        }
    }

    /// Overrides the publish retry budget.
    #[must_use]
    pub const fn with_publish_retries(mut self, retries: u32) -> Self {
        self.publish_retries = retries;
        self
    }

    /// Runs the normalization pipeline for one source reference.
    ///
    /// Never returns an error: the result is `PassThrough`, `Normalized`,
    /// or `Degraded` with the placeholder.
    pub async fn execute(&self, source: &ContentRef) -> NormalizationResult {
        let class = classify(&source.mime);

        if !class.needs_still_frame() {
            debug!(source = %source, class = %class, "Static-compatible source, passing through");
            return NormalizationResult::PassThrough {
                source: source.clone(),
            };
        }

        debug!(source = %source, class = %class, "Normalizing to a still frame");

        let bytes = match self.fetcher.fetch(&source.path).await {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(source = %source, error = %err, "Source fetch failed, degrading to placeholder");
                return self.degraded(DegradeReason::Fetch);
            }
        };

        let png = match self.transcoder.still_png(&bytes, class).await {
            Ok(png) => png,
            Err(err) => {
                warn!(source = %source, error = %err, "Transcode failed, degrading to placeholder");
                return self.degraded(DegradeReason::Transcode);
            }
        };

        let name = suggested_name(&source.path);
        let cid = match self.publish_with_retry(&png, &name).await {
            Ok(cid) => cid,
            Err(err) => {
                warn!(source = %source, error = %err, "Publish failed, degrading to placeholder");
                return self.degraded(DegradeReason::Publish);
            }
        };

        info!(
            source = %source,
            cid = %cid,
            backend = self.publisher.backend_name(),
            "Published still frame"
        );

        NormalizationResult::Normalized {
            new_ref: ContentRef::raw(cid, "image/png"),
        }
    }

    async fn publish_with_retry(&self, bytes: &[u8], name: &str) -> Result<String, PublishError> {
        let mut attempt = 0;
        loop {
            match self.publisher.publish(bytes, name).await {
                Ok(cid) => return Ok(cid),
                Err(err) if err.is_retryable() && attempt < self.publish_retries => {
                    attempt += 1;
                    warn!(
                        attempt,
                        error = %err,
                        backend = self.publisher.backend_name(),
                        "Publish attempt failed, retrying"
                    );
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn degraded(&self, reason: DegradeReason) -> NormalizationResult {
        NormalizationResult::Degraded {
            placeholder: self.placeholder.clone(),
            reason,
        }
    }
}

/// Derives a stable upload name from the source identifier.
fn suggested_name(path: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.as_bytes());
    let digest = hasher.finalize();
    format!("{}-still.png", hex::encode(&digest[..8]))
}
