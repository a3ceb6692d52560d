use super::app_config::{LogLevel, PublishBackendKind};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "oxilink",
    version,
    about = "Content resolution and thumbnail normalization for an IPFS-backed link shortener",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Mirror base URL, repeatable; replaces the configured set.
    #[arg(long = "mirror", value_name = "URL")]
    pub mirrors: Vec<String>,

    /// Per-probe timeout in milliseconds.
    #[arg(long, value_name = "MS")]
    pub probe_timeout_ms: Option<u64>,

    /// Publish backend.
    #[arg(long, value_enum)]
    pub publish_backend: Option<PublishBackendKind>,

    /// Placeholder asset URL.
    #[arg(long, value_name = "URL")]
    pub placeholder_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Operational entry points.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Resolve a stored reference to a servable URL (the serve-time path).
    Resolve {
        /// Content identifier or external URL.
        path: String,

        /// Declared MIME type of the content.
        #[arg(long, default_value = "image/png")]
        mime: String,
    },

    /// Normalize a source reference into a preview-ready one (the
    /// creation-time path).
    Normalize {
        /// Content identifier or external URL.
        path: String,

        /// Declared MIME type of the content.
        #[arg(long)]
        mime: String,
    },

    /// Probe every configured mirror for an identifier and report outcomes.
    Probe {
        /// Content identifier.
        path: String,
    },
}
