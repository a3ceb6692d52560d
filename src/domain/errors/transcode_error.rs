//! Still-frame transcoding error types.

use thiserror::Error;

/// Transcoding error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum TranscodeError {
    #[error("failed to decode source: {message}")]
    Decode { message: String },

    #[error("failed to encode still frame: {message}")]
    Encode { message: String },

    #[error("frame extraction tool failed: {message}")]
    Tool { message: String },

    #[error("io error during transcode: {0}")]
    Io(#[from] std::io::Error),
}

impl TranscodeError {
    /// Creates a decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates an encode error.
    #[must_use]
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    /// Creates a tool invocation error.
    #[must_use]
    pub fn tool(message: impl Into<String>) -> Self {
        Self::Tool {
            message: message.into(),
        }
    }
}
