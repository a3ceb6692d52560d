//! Pure domain services.

mod media_classifier;

pub use media_classifier::classify;
