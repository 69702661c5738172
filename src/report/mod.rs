//! Reporting utilities: series summaries and terminal tables.

pub mod format;

pub use format::*;
