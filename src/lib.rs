//! Oxilink - content resolution and normalization for a link shortener.
//!
//! This crate provides the media pipeline behind an IPFS-backed link
//! shortener: racing content probes across gateway mirrors, reducing
//! animated and video sources to still PNG frames, publishing them to a
//! content-addressed backend, and resolving stored references back to
//! servable URLs with placeholder fallback.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing services and use cases.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "oxilink";
