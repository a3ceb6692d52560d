//! Port definition for fetching content bytes by identifier.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::errors::FetchError;

/// Port for retrieving the raw bytes of a content identifier.
#[async_trait]
pub trait ContentFetchPort: Send + Sync {
    /// Fetches the bytes behind `identifier`, or fails if no mirror has it.
    async fn fetch(&self, identifier: &str) -> Result<Bytes, FetchError>;
}
