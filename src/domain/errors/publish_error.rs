//! Publish backend error types.

use thiserror::Error;

/// Publish error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum PublishError {
    #[error("publish backend rejected upload: {status} - {message}")]
    Rejected { status: u16, message: String },

    #[error("publish backend unreachable: {message}")]
    Network { message: String },

    #[error("publish backend returned an unusable response: {message}")]
    InvalidResponse { message: String },

    #[error("publish backend credentials missing or invalid")]
    MissingCredentials,
}

impl PublishError {
    /// Creates a rejection error from an HTTP status and body message.
    #[must_use]
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Creates a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates an invalid-response error.
    #[must_use]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Returns true if an immediate retry is worth attempting.
    ///
    /// Backend flakiness shows up as transport errors or 5xx; a 4xx
    /// rejection or bad credentials will not improve on retry.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Rejected { status, .. } => *status >= 500,
            Self::InvalidResponse { .. } | Self::MissingCredentials => false,
        }
    }
}
