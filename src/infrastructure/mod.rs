//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Mirror network adapters.
pub mod gateway;
/// Publish backend adapters.
pub mod publish;
/// Still-frame transcoding adapters.
pub mod transcode;

pub use config::{AppConfig, CliArgs, Command, LogLevel, PublishBackendKind, StorageManager};
pub use gateway::HttpMirrorProber;
pub use publish::{create_publisher, NftStorageClient, PinataClient};
pub use transcode::StillFrameTranscoder;
