//! Name -> id lookups.
//!
//! Queries take these as capabilities so they never own the listing
//! requests themselves; a caching implementation can be swapped in freely.

use serde_json::Value;

use crate::error::AppError;

/// Resolve a coin name (e.g. "Ethereum") to its CoinGecko id.
pub trait CoinLookup {
    /// `Ok(None)` when no coin carries that name.
    fn resolve_coin(&self, name: &str) -> Result<Option<String>, AppError>;
}

/// Resolve a chain name (e.g. "BNB Smart Chain") to its Centic chain id.
pub trait ChainLookup {
    /// `Ok(None)` when no chain carries that name.
    fn resolve_chain(&self, name: &str) -> Result<Option<String>, AppError>;
}

/// Find a coin id in a `coins/list` payload: `[{"id", "symbol", "name"}, ...]`.
///
/// Names compare case-insensitively; the first match wins.
pub fn find_coin_id(list: &Value, name: &str) -> Option<String> {
    let wanted = name.trim().to_lowercase();
    list.as_array()?
        .iter()
        .find(|coin| {
            coin.get("name")
                .and_then(Value::as_str)
                .is_some_and(|n| n.to_lowercase() == wanted)
        })
        .and_then(|coin| coin.get("id"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Find a chain id in a `common/chains` payload: `{"chains": {"<id>": {"name"}}}`.
///
/// Names compare exactly.
pub fn find_chain_id(payload: &Value, name: &str) -> Option<String> {
    payload
        .get("chains")?
        .as_object()?
        .iter()
        .find(|(_, info)| info.get("name").and_then(Value::as_str) == Some(name))
        .map(|(id, _)| id.clone())
}
