//! Port definition for still-frame transcoding.

use async_trait::async_trait;

use crate::domain::entities::MediaClass;
use crate::domain::errors::TranscodeError;

/// Port for reducing animated or video content to a single PNG frame.
#[async_trait]
pub trait TranscodePort: Send + Sync {
    /// Extracts a representative frame from `bytes` and encodes it as PNG.
    ///
    /// `class` selects the extraction strategy; callers only pass classes
    /// where [`MediaClass::needs_still_frame`] holds.
    async fn still_png(&self, bytes: &[u8], class: MediaClass) -> Result<Vec<u8>, TranscodeError>;
}

#[cfg(test)]
pub mod mock {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Mock transcoder returning fixed PNG bytes, or failing every call.
    pub struct MockTranscoder {
        output: Option<Vec<u8>>,
        calls: AtomicUsize,
    }

    impl MockTranscoder {
        /// Creates a mock producing the given PNG bytes.
        pub fn with_output(output: Vec<u8>) -> Self {
            Self {
                output: Some(output),
                calls: AtomicUsize::new(0),
            }
        }

        /// Creates a mock where every transcode fails.
        pub fn failing() -> Self {
            Self {
                output: None,
                calls: AtomicUsize::new(0),
            }
        }

        /// Returns how many times `still_png` was invoked.
        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TranscodePort for MockTranscoder {
        async fn still_png(
            &self,
            _bytes: &[u8],
            _class: MediaClass,
        ) -> Result<Vec<u8>, TranscodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.output {
                Some(output) => Ok(output.clone()),
                None => Err(TranscodeError::decode("scripted failure")),
            }
        }
    }
}
