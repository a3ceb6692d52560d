//! Still-frame transcoding adapters.

mod still_frame;

pub use still_frame::StillFrameTranscoder;
