//! Application layer with services and use cases.

/// Orchestrating services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use services::{AssetResolutionService, ContentFetcher, GatewayResolver};
pub use use_cases::NormalizeThumbnailUseCase;
