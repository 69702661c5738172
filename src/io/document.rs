//! Read/write JSON documents.
//!
//! `wh normalize` reads a previously saved upstream payload; every command
//! can write its result (JSON or text) to a file instead of stdout.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde_json::Value;

use crate::error::AppError;

/// Read a JSON document from disk.
pub fn read_json_document(path: &Path) -> Result<Value, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::new(2, format!("Invalid JSON in '{}': {e}", path.display())))
}

/// Write a pretty-printed JSON document.
pub fn write_json(path: &Path, value: &Value) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create '{}': {e}", path.display())))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .map_err(|e| AppError::new(4, format!("Failed to write JSON: {e}")))?;
    writeln!(writer).map_err(|e| AppError::new(4, format!("Failed to write JSON: {e}")))?;
    Ok(())
}

/// Write plain text output (tables, single ids) to a file.
pub fn write_text(path: &Path, text: &str) -> Result<(), AppError> {
    std::fs::write(path, text).map_err(|e| AppError::new(4, format!("Failed to write '{}': {e}", path.display())))
}

/// Render a document for stdout.
pub fn to_pretty_string(value: &Value) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::new(4, format!("Failed to render JSON: {e}")))
}
