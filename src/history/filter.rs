//! Trailing look-back window.

use chrono::{NaiveDateTime, TimeDelta};

use crate::error::HistoryError;
use crate::history::{HistorySeries, parse_history_key};

/// Lower bound of the window: `now - (interval_days + 1) days`.
///
/// The extra day is part of the contract: a 6-day interval evaluated at
/// midnight keeps everything from seven days back. A cutoff that would fall
/// before the earliest representable date saturates to it.
pub fn interval_cutoff(now: NaiveDateTime, interval_days: i64) -> Result<NaiveDateTime, HistoryError> {
    if interval_days < 0 {
        return Err(HistoryError::InvalidInterval { days: interval_days });
    }
    let cutoff = interval_days
        .checked_add(1)
        .and_then(TimeDelta::try_days)
        .and_then(|span| now.checked_sub_signed(span))
        .unwrap_or(NaiveDateTime::MIN);
    Ok(cutoff)
}

/// Keep entries whose key parses to a datetime `>= cutoff`.
///
/// Never adds keys and preserves the input order. Entries after `now` are
/// kept; only the lower bound is enforced.
pub fn filter_by_interval(
    series: &HistorySeries,
    interval_days: i64,
    now: NaiveDateTime,
) -> Result<HistorySeries, HistoryError> {
    let cutoff = interval_cutoff(now, interval_days)?;

    let mut out = HistorySeries::new();
    for (key, value) in series {
        if parse_history_key(key)? >= cutoff {
            out.insert(key.clone(), value.clone());
        }
    }
    Ok(out)
}
