//! Port definition for content-addressed publish backends.

use async_trait::async_trait;

use crate::domain::errors::PublishError;

/// Port for uploading bytes to a content-addressed storage backend.
///
/// Exactly one concrete backend is configured per deployment; the trait
/// exists so backends are swappable without touching the normalizer. Must be
/// safe to call concurrently: implementations hold only read-only
/// credentials.
#[async_trait]
pub trait PublishPort: Send + Sync {
    /// Uploads `bytes` under a suggested `name`, returning the resulting
    /// content identifier.
    async fn publish(&self, bytes: &[u8], name: &str) -> Result<String, PublishError>;

    /// Human-readable backend name for logs.
    fn backend_name(&self) -> &'static str;
}
