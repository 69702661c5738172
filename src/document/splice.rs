//! Path-addressed replacement inside a JSON document.

use serde_json::{Map, Value};

use crate::error::HistoryError;
use crate::history::{HistoryPipeline, HistorySeries};

/// Split a dotted path (`"data.history"`) into segments.
pub fn parse_path(dotted: &str) -> Vec<&str> {
    dotted.split('.').filter(|s| !s.is_empty()).collect()
}

/// Read the node at `path`.
pub fn resolve<'a>(root: &'a Value, path: &[&str]) -> Result<&'a Value, HistoryError> {
    if path.is_empty() {
        return Err(HistoryError::path_not_found(path));
    }
    let mut node = root;
    for (depth, key) in path.iter().enumerate() {
        node = node
            .as_object()
            .and_then(|obj| obj.get(*key))
            .ok_or_else(|| HistoryError::path_not_found(&path[..=depth]))?;
    }
    Ok(node)
}

/// Set `root[path[0]]...[path[n-1]] = new_value` and return `new_value`.
///
/// Every segment but the last must exist and be an object. The last key may
/// be new; an existing key keeps its position in the parent. Nothing else in
/// the document changes.
pub fn splice(root: &mut Value, path: &[&str], new_value: Value) -> Result<Value, HistoryError> {
    let Some((last, parents)) = path.split_last() else {
        return Err(HistoryError::path_not_found(path));
    };

    let mut node = root
        .as_object_mut()
        .ok_or_else(|| HistoryError::path_not_found(&path[..1]))?;
    for (depth, key) in parents.iter().enumerate() {
        node = node
            .get_mut(*key)
            .and_then(Value::as_object_mut)
            .ok_or_else(|| HistoryError::path_not_found(&path[..=depth]))?;
    }

    node.insert((*last).to_string(), new_value.clone());
    Ok(new_value)
}

/// Move the "current" fields of `root` into the ledger at `ledger_path`.
///
/// The fields are removed from the top level and bundled into one entry
/// keyed by `now_epoch`, so the next pipeline run sees the latest snapshot
/// alongside the historical ones. All fields and the ledger must exist, and
/// no field may be the ledger's top-level key; the document is left
/// untouched otherwise.
pub fn relocate_current(
    root: &mut Value,
    fields: &[&str],
    ledger_path: &[&str],
    now_epoch: i64,
) -> Result<Value, HistoryError> {
    if !resolve(root, ledger_path)?.is_object() {
        return Err(HistoryError::path_not_found(ledger_path));
    }
    let obj = root
        .as_object_mut()
        .ok_or_else(|| HistoryError::path_not_found(ledger_path))?;
    if let Some(missing) = fields.iter().find(|f| !obj.contains_key(**f)) {
        return Err(HistoryError::path_not_found(&[*missing]));
    }
    // Moving the ledger (or its ancestor) would leave nothing to splice into.
    if fields.iter().any(|f| ledger_path.first() == Some(f)) {
        return Err(HistoryError::path_not_found(ledger_path));
    }

    let mut entry = Map::with_capacity(fields.len());
    for field in fields {
        if let Some(value) = obj.shift_remove(*field) {
            entry.insert((*field).to_string(), value);
        }
    }

    let key = now_epoch.to_string();
    let mut entry_path = ledger_path.to_vec();
    entry_path.push(&key);
    splice(root, &entry_path, Value::Object(entry))
}

/// Run the history pipeline over the ledger at `path` and install the result
/// in its place. Returns the filtered view.
pub fn reshape(
    root: &mut Value,
    path: &[&str],
    interval_days: i64,
    pipeline: &HistoryPipeline,
) -> Result<HistorySeries, HistoryError> {
    let ledger = resolve(root, path)?
        .as_object()
        .ok_or_else(|| HistoryError::path_not_found(path))?;
    let view = pipeline.run(ledger, interval_days)?;
    splice(root, path, Value::Object(view.clone()))?;
    Ok(view)
}
