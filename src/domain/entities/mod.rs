//! Domain entity definitions.

mod content_ref;
mod media_class;
mod mirror;
mod normalization;

pub use content_ref::{ContentRef, RefScheme};
pub use media_class::MediaClass;
pub use mirror::{
    FetchedContent, MirrorEndpoint, MirrorSet, ProbeOutcome, ProbeResult, ServableUrl,
};
pub use normalization::{DegradeReason, NormalizationResult};
