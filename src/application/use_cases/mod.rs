//! Use case implementations.

mod normalize_thumbnail;

pub use normalize_thumbnail::NormalizeThumbnailUseCase;
