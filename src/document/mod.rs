//! In-place reshaping of upstream JSON documents.
//!
//! Upstream payloads are handled as `serde_json::Value` trees; this module
//! addresses nodes by key path instead of ad hoc repeated indexing, so a
//! missing segment surfaces as `PathNotFound` at the point of use.

pub mod splice;

pub use splice::*;
