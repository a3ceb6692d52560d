//! Application configuration.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::domain::entities::MirrorSet;

const APP_NAME: &str = "oxilink";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "linuxmobile";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Which publish backend a deployment uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PublishBackendKind {
    /// Pinata pinning service.
    #[default]
    Pinata,
    /// nft.storage content-addressed network.
    NftStorage,
}

impl PublishBackendKind {
    /// Environment variable holding this backend's API token.
    #[must_use]
    pub const fn token_env(self) -> &'static str {
        match self {
            Self::Pinata => "PINATA_TOKEN",
            Self::NftStorage => "NFT_STORAGE_TOKEN",
        }
    }
}

impl std::fmt::Display for PublishBackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pinata => write!(f, "pinata"),
            Self::NftStorage => write!(f, "nft-storage"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Mirror base URLs, in configuration order.
    #[serde(default = "default_mirrors")]
    pub mirrors: Vec<String>,

    /// Per-probe timeout in milliseconds.
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,

    /// Placeholder asset served when resolution fails.
    #[serde(default = "default_placeholder_url")]
    pub placeholder_url: String,

    /// Publish backend configuration.
    #[serde(default)]
    pub publish: PublishConfig,

    /// Transcoding configuration.
    #[serde(default)]
    pub transcode: TranscodeConfig,
}

/// Publish backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishConfig {
    /// Active backend.
    #[serde(default)]
    pub backend: PublishBackendKind,

    /// Immediate retries after a failed publish attempt.
    #[serde(default = "default_publish_retries")]
    pub retries: u32,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            backend: PublishBackendKind::default(),
            retries: default_publish_retries(),
        }
    }
}

/// Transcoding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscodeConfig {
    /// Path to the ffmpeg binary used for video frame extraction.
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,
}

impl Default for TranscodeConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
        }
    }
}

fn default_mirrors() -> Vec<String> {
    [
        "https://ipfs.io/ipfs/",
        "https://gateway.pinata.cloud/ipfs/",
        "https://cloudflare-ipfs.com/ipfs/",
        "https://dweb.link/ipfs/",
        "https://4everland.io/ipfs/",
        "https://ipfs.eth.aragon.network/ipfs/",
        "https://w3s.link/ipfs/",
        "https://trustless-gateway.link/ipfs/",
        "https://ipfs.runfission.com/ipfs/",
        "https://hardbin.com/ipfs/",
        "https://nftstorage.link/ipfs/",
    ]
    .map(String::from)
    .to_vec()
}

fn default_probe_timeout_ms() -> u64 {
    2000
}

fn default_placeholder_url() -> String {
    "/images/oxilink-not-found.svg".to_string()
}

fn default_publish_retries() -> u32 {
    1
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if !args.mirrors.is_empty() {
            self.mirrors = args.mirrors.clone();
        }
        if let Some(timeout) = args.probe_timeout_ms {
            self.probe_timeout_ms = timeout;
        }
        if let Some(backend) = args.publish_backend {
            self.publish.backend = backend;
        }
        if let Some(placeholder) = &args.placeholder_url {
            self.placeholder_url = placeholder.clone();
        }
    }

    /// Builds the mirror set in configuration order.
    #[must_use]
    pub fn mirror_set(&self) -> MirrorSet {
        MirrorSet::from_base_urls(self.mirrors.iter().cloned())
    }

    /// Returns the per-probe timeout.
    #[must_use]
    pub const fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("oxilink.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            mirrors: default_mirrors(),
            probe_timeout_ms: default_probe_timeout_ms(),
            placeholder_url: default_placeholder_url(),
            publish: PublishConfig::default(),
            transcode: TranscodeConfig::default(),
        }
    }
}
