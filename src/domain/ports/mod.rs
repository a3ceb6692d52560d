//! Port definitions.

mod fetch_port;
mod probe_port;
mod publish_port;
mod transcode_port;

pub use fetch_port::ContentFetchPort;
pub use probe_port::{MirrorProbePort, ProbeFailure};
pub use publish_port::PublishPort;
pub use transcode_port::TranscodePort;

#[cfg(test)]
pub mod mocks {
    pub use super::fetch_port::mock::MockContentFetcher;
    pub use super::probe_port::mock::{MirrorScript, MockMirrorProber};
    pub use super::publish_port::mock::MockPublisher;
    pub use super::transcode_port::mock::MockTranscoder;
}
