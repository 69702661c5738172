//! Upstream queries: fetch a document, reshape its history ledgers, return it.

pub mod market;
pub mod portfolio;

pub use market::*;
pub use portfolio::*;
