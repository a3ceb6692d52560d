//! Content fetch error types.

use thiserror::Error;

use super::ResolutionError;

/// Errors raised when retrieving content bytes through the mirror network.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Every mirror failed or timed out.
    #[error("content unavailable: {0}")]
    Unavailable(#[source] ResolutionError),
}

impl FetchError {
    /// Returns true if another attempt could plausibly succeed.
    ///
    /// Mirror availability fluctuates, so exhaustion is always retryable
    /// from the caller's perspective.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}
