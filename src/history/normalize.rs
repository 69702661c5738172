//! Epoch keys -> human-readable local timestamps.

use crate::clock::Clock;
use crate::error::HistoryError;
use crate::history::{HistorySeries, TIMESTAMP_FORMAT};

/// Rewrite every epoch-second key as `YYYY-MM-DD HH:MM:SS` in the clock's zone.
///
/// Builds a new mapping; the input is left untouched. Two keys that render to
/// the same timestamp collapse, the later one in iteration order winning.
pub fn normalize_timestamps(
    series: &HistorySeries,
    clock: &dyn Clock,
) -> Result<HistorySeries, HistoryError> {
    let mut out = HistorySeries::with_capacity(series.len());
    for (key, value) in series {
        let secs: i64 = key
            .trim()
            .parse()
            .map_err(|_| HistoryError::malformed(key))?;
        let local = clock
            .local_datetime(secs)
            .ok_or_else(|| HistoryError::malformed(key))?;
        out.insert(local.format(TIMESTAMP_FORMAT).to_string(), value.clone());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use serde_json::json;

    use super::*;
    use crate::clock::FixedClock;

    fn clock() -> FixedClock {
        let now = NaiveDateTime::parse_from_str("2024-01-10 00:00:00", TIMESTAMP_FORMAT).unwrap();
        FixedClock::utc(now)
    }

    fn series(value: serde_json::Value) -> HistorySeries {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn rewrites_keys_and_keeps_values() {
        let input = series(json!({
            "1700000000": {"score": 10},
            "1700003600": [1, 2, 3],
        }));

        let out = normalize_timestamps(&input, &clock()).unwrap();

        let keys: Vec<&str> = out.keys().map(String::as_str).collect();
        assert_eq!(keys, ["2023-11-14 22:13:20", "2023-11-14 23:13:20"]);
        assert_eq!(out["2023-11-14 22:13:20"], json!({"score": 10}));
        assert_eq!(out["2023-11-14 23:13:20"], json!([1, 2, 3]));
    }

    #[test]
    fn colliding_keys_keep_last_value() {
        let input = series(json!({
            "1700000000": "first",
            " 1700000000": "second",
        }));

        let out = normalize_timestamps(&input, &clock()).unwrap();

        assert_eq!(out.len(), 1);
        assert_eq!(out["2023-11-14 22:13:20"], json!("second"));
    }

    #[test]
    fn non_integer_key_fails_loudly() {
        let input = series(json!({
            "1700000000": 1,
            "yesterday": 2,
        }));

        let err = normalize_timestamps(&input, &clock()).unwrap_err();
        assert_eq!(err, HistoryError::MalformedTimestamp { key: "yesterday".into() });
    }

    #[test]
    fn out_of_range_epoch_is_malformed() {
        let mut input = HistorySeries::new();
        input.insert(i64::MAX.to_string(), json!(1));
        assert!(matches!(
            normalize_timestamps(&input, &clock()),
            Err(HistoryError::MalformedTimestamp { .. })
        ));
    }

    #[test]
    fn empty_series_is_empty() {
        let out = normalize_timestamps(&HistorySeries::new(), &clock()).unwrap();
        assert!(out.is_empty());
    }
}
