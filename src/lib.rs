//! `wallet-history` library crate.
//!
//! The binary (`wh`) is a thin wrapper around this library so that:
//!
//! - the history normalizer is testable without spawning processes or
//!   touching the network
//! - upstream clients can be swapped for in-memory sources
//! - other front-ends can reuse the queries as-is

pub mod app;
pub mod cli;
pub mod clock;
pub mod config;
pub mod data;
pub mod document;
pub mod error;
pub mod history;
pub mod io;
pub mod query;
pub mod report;
