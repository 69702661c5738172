//! Human-readable views of normalized series.
//!
//! Commands print JSON by default; `--table` renders the reshaped ledger as
//! an aligned two-column table instead. Every reshaped ledger is also logged
//! as a one-line summary.

use serde_json::Value;

use crate::history::HistorySeries;

/// Span of a normalized series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesSummary {
    pub entries: usize,
    pub first: Option<String>,
    pub last: Option<String>,
}

pub fn summarize_series(series: &HistorySeries) -> SeriesSummary {
    SeriesSummary {
        entries: series.len(),
        first: series.keys().next().cloned(),
        last: series.keys().next_back().cloned(),
    }
}

/// One-line span of a reshaped ledger: `asset: 3 entries, 2024-01-03 .. 2024-01-09`.
pub fn format_series_summary(label: &str, series: &HistorySeries) -> String {
    let summary = summarize_series(series);
    match (&summary.first, &summary.last) {
        (Some(first), Some(last)) => format!("{label}: {} entries, {first} .. {last}", summary.entries),
        _ => format!("{label}: 0 entries"),
    }
}

/// Format a series as `key | value` rows under a title.
pub fn format_series_table(title: &str, series: &HistorySeries) -> String {
    let mut out = String::new();
    let summary = summarize_series(series);

    out.push_str(&format!("=== {title} ===\n"));
    match (&summary.first, &summary.last) {
        (Some(first), Some(last)) => {
            out.push_str(&format!("Entries: {} | {} .. {}\n", summary.entries, first, last));
        }
        _ => {
            out.push_str("Entries: 0\n");
            return out;
        }
    }

    let key_width = series.keys().map(String::len).max().unwrap_or(0);
    for (key, value) in series {
        out.push_str(&format!("{key:<key_width$} | {}\n", format_value(value)));
    }
    out
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => format!("{f:.4}"),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
