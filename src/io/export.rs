//! Export a normalized series to CSV.
//!
//! One row per entry: the day (or timestamp) key and the value as JSON text,
//! so the file opens in a spreadsheet without losing nested records.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::Value;

use crate::error::AppError;
use crate::history::HistorySeries;

/// Write `timestamp,value` rows in series order.
pub fn write_series_csv(path: &Path, series: &HistorySeries) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let mut writer = BufWriter::new(file);
    write_series_rows(&mut writer, series)
        .map_err(|e| AppError::new(4, format!("Failed to write export CSV: {e}")))
}

fn write_series_rows(out: &mut impl Write, series: &HistorySeries) -> std::io::Result<()> {
    writeln!(out, "timestamp,value")?;
    for (key, value) in series {
        writeln!(out, "{},{}", csv_field(key), csv_field(&value_text(value)))?;
    }
    out.flush()
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn quotes_nested_values() {
        let series = json!({
            "2024-01-08": 712,
            "2024-01-09": {"creditScore": 731, "rank": "A"},
            "2024-01-10": "n/a",
        })
        .as_object()
        .cloned()
        .unwrap();

        let mut buf = Vec::new();
        write_series_rows(&mut buf, &series).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "timestamp,value\n\
             2024-01-08,712\n\
             2024-01-09,\"{\"\"creditScore\"\":731,\"\"rank\"\":\"\"A\"\"}\"\n\
             2024-01-10,n/a\n"
        );
    }
}
