//! Mirror network adapters.

mod http_prober;

pub use http_prober::HttpMirrorProber;
