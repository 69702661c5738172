//! Input/output helpers.
//!
//! - JSON document read/write (`document`)
//! - series exports to CSV (`export`)

pub mod document;
pub mod export;

pub use document::*;
pub use export::*;
