//! Domain error types.

mod fetch_error;
mod publish_error;
mod resolution_error;
mod transcode_error;

pub use fetch_error::FetchError;
pub use publish_error::PublishError;
pub use resolution_error::ResolutionError;
pub use transcode_error::TranscodeError;
