//! Collapse a series to one entry per calendar day.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::error::HistoryError;
use crate::history::{DAY_FORMAT, HistorySeries, parse_history_key};

/// A day's surviving entry together with the full timestamp that won it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DayWinner {
    pub day: String,
    pub at: NaiveDateTime,
    pub value: Value,
}

/// Pick each day's latest entry, keeping its full timestamp.
///
/// Days are returned in the order they are first seen.
pub(crate) fn bucket_with_times(series: &HistorySeries) -> Result<Vec<DayWinner>, HistoryError> {
    let mut slots: HashMap<String, usize> = HashMap::with_capacity(series.len());
    let mut winners: Vec<DayWinner> = Vec::with_capacity(series.len());

    for (key, value) in series {
        let at = parse_history_key(key)?;
        let day = at.format(DAY_FORMAT).to_string();

        match slots.get(&day) {
            Some(&slot) if at < winners[slot].at => {}
            Some(&slot) => {
                winners[slot].at = at;
                winners[slot].value = value.clone();
            }
            None => {
                slots.insert(day.clone(), winners.len());
                winners.push(DayWinner {
                    day,
                    at,
                    value: value.clone(),
                });
            }
        }
    }

    Ok(winners)
}

/// Keep, for every calendar day, the entry with the latest full timestamp.
///
/// Output keys are `YYYY-MM-DD`, in the order each day is first seen. The
/// winner is chosen by comparing timestamps, so shuffling the input changes
/// at most the key order, never which value survives. Losing entries are
/// dropped whole; values are never merged.
///
/// Day keys (`YYYY-MM-DD`) are accepted as midnight, which makes the
/// function idempotent.
pub fn bucket_by_day(series: &HistorySeries) -> Result<HistorySeries, HistoryError> {
    Ok(bucket_with_times(series)?
        .into_iter()
        .map(|winner| (winner.day, winner.value))
        .collect())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use serde_json::json;

    use super::*;
    use crate::clock::FixedClock;
    use crate::history::{TIMESTAMP_FORMAT, normalize_timestamps};

    fn series(value: Value) -> HistorySeries {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn same_day_epochs_keep_latest() {
        let now = NaiveDateTime::parse_from_str("2024-01-10 00:00:00", TIMESTAMP_FORMAT).unwrap();
        let raw = series(json!({
            "1700000000": {"score": 10},
            "1700003600": {"score": 20},
        }));

        let normalized = normalize_timestamps(&raw, &FixedClock::utc(now)).unwrap();
        let out = bucket_by_day(&normalized).unwrap();

        assert_eq!(out, series(json!({"2023-11-14": {"score": 20}})));
    }

    #[test]
    fn latest_wins_regardless_of_order() {
        let forward = series(json!({
            "2024-01-03 08:00:00": "early",
            "2024-01-03 18:00:00": "late",
        }));
        let backward = series(json!({
            "2024-01-03 18:00:00": "late",
            "2024-01-03 08:00:00": "early",
        }));

        assert_eq!(bucket_by_day(&forward).unwrap()["2024-01-03"], json!("late"));
        assert_eq!(bucket_by_day(&backward).unwrap()["2024-01-03"], json!("late"));
    }

    #[test]
    fn one_entry_per_distinct_day() {
        let input = series(json!({
            "2024-01-01 01:00:00": 1,
            "2024-01-02 23:59:59": 2,
            "2024-01-01 23:00:00": 3,
            "2024-01-02 00:00:00": 4,
            "2024-01-05 12:00:00": 5,
        }));

        let out = bucket_by_day(&input).unwrap();

        let days: HashSet<&str> = input.keys().map(|k| &k[..10]).collect();
        assert_eq!(out.len(), days.len());
        assert!(out.len() <= input.len());
        let keys: Vec<&str> = out.keys().map(String::as_str).collect();
        assert_eq!(keys, ["2024-01-01", "2024-01-02", "2024-01-05"]);
        assert_eq!(out["2024-01-01"], json!(3));
        assert_eq!(out["2024-01-02"], json!(2));
    }

    #[test]
    fn bucketing_is_idempotent() {
        let input = series(json!({
            "2024-01-01 01:00:00": {"v": 1},
            "2024-01-01 02:00:00": {"v": 2},
            "2024-01-02 00:30:00": {"v": 3},
        }));

        let once = bucket_by_day(&input).unwrap();
        let twice = bucket_by_day(&once).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn winners_keep_their_full_timestamp() {
        let input = series(json!({
            "2024-01-03 08:00:00": "early",
            "2024-01-04 01:00:00": "next day",
            "2024-01-03 23:00:00": "late",
        }));

        let winners = bucket_with_times(&input).unwrap();

        let got: Vec<(&str, String, &Value)> = winners
            .iter()
            .map(|w| (w.day.as_str(), w.at.format(TIMESTAMP_FORMAT).to_string(), &w.value))
            .collect();
        assert_eq!(
            got,
            [
                ("2024-01-03", "2024-01-03 23:00:00".to_string(), &json!("late")),
                ("2024-01-04", "2024-01-04 01:00:00".to_string(), &json!("next day")),
            ]
        );
    }

    #[test]
    fn malformed_key_aborts() {
        let input = series(json!({
            "2024-01-01 01:00:00": 1,
            "not a date": 2,
        }));

        assert_eq!(
            bucket_by_day(&input),
            Err(HistoryError::MalformedTimestamp { key: "not a date".into() })
        );
    }
}
