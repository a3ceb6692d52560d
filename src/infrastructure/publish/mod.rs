//! Content-addressed publish backends.

mod nft_storage;
mod pinata;

use std::sync::Arc;

pub use nft_storage::NftStorageClient;
pub use pinata::PinataClient;

use crate::domain::errors::PublishError;
use crate::domain::ports::PublishPort;
use crate::infrastructure::config::PublishBackendKind;

/// Builds the configured publish backend.
///
/// Exactly one backend is active per deployment; new kinds are additive
/// here without touching the normalizer.
///
/// # Errors
/// Returns error if the token is missing or the client cannot be built.
pub fn create_publisher(
    kind: PublishBackendKind,
    token: &str,
) -> Result<Arc<dyn PublishPort>, PublishError> {
    match kind {
        PublishBackendKind::Pinata => Ok(Arc::new(PinataClient::new(token)?)),
        PublishBackendKind::NftStorage => Ok(Arc::new(NftStorageClient::new(token)?)),
    }
}
