//! Temporal history normalizer.
//!
//! Upstream ledgers are JSON objects keyed by UNIX epoch seconds. This module
//! turns them into a day-resolution, interval-filtered series:
//!
//! - epoch keys -> `YYYY-MM-DD HH:MM:SS` (`normalize`)
//! - one entry per calendar day, latest wins (`bucket`)
//! - trailing look-back window (`filter`)
//! - the composition of the three (`pipeline`)
//!
//! Values are opaque and carried through untouched.

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

use crate::error::HistoryError;

pub mod bucket;
pub mod filter;
pub mod normalize;
pub mod pipeline;

pub use bucket::bucket_by_day;
pub use filter::{filter_by_interval, interval_cutoff};
pub use normalize::normalize_timestamps;
pub use pipeline::HistoryPipeline;

/// Insertion-ordered timestamp-keyed series.
pub type HistorySeries = Map<String, Value>;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Parse a formatted history key.
///
/// Accepts a full `YYYY-MM-DD HH:MM:SS` timestamp or a day bucket key
/// `YYYY-MM-DD`, which reads as midnight.
pub fn parse_history_key(key: &str) -> Result<NaiveDateTime, HistoryError> {
    if let Ok(ts) = NaiveDateTime::parse_from_str(key, TIMESTAMP_FORMAT) {
        return Ok(ts);
    }
    NaiveDate::parse_from_str(key, DAY_FORMAT)
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .ok_or_else(|| HistoryError::malformed(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_and_day_keys() {
        let full = parse_history_key("2024-01-03 12:30:05").unwrap();
        assert_eq!(full.to_string(), "2024-01-03 12:30:05");

        let day = parse_history_key("2024-01-03").unwrap();
        assert_eq!(day.to_string(), "2024-01-03 00:00:00");
    }

    #[test]
    fn rejects_epoch_and_garbage_keys() {
        for key in ["1700000000", "", "2024-13-01", "2024-01-03T12:00:00"] {
            assert_eq!(
                parse_history_key(key),
                Err(HistoryError::MalformedTimestamp { key: key.to_string() }),
                "key {key:?}"
            );
        }
    }
}
