//! CoinGecko API integration (coin listing and market charts).

use serde_json::Value;

use crate::config::Config;
use crate::data::lookup::{CoinLookup, find_coin_id};
use crate::data::source::{HttpSource, JsonSource, endpoint};
use crate::error::AppError;

const DEMO_KEY_HEADER: &str = "x-cg-demo-api-key";

const COINS_LIST: &str = "coins/list";

pub struct CoinGeckoClient<S = HttpSource> {
    source: S,
    base_url: String,
}

impl CoinGeckoClient<HttpSource> {
    /// The public API works without a key; one is attached when configured.
    pub fn from_config(config: &Config) -> Self {
        let mut source = HttpSource::new("CoinGecko");
        if let Some(key) = &config.coingecko_api_key {
            source = source.with_auth_header(DEMO_KEY_HEADER, key.clone());
        }
        Self::new(source, &config.coingecko_base_url)
    }
}

impl<S: JsonSource> CoinGeckoClient<S> {
    pub fn new(source: S, base_url: &str) -> Self {
        Self {
            source,
            base_url: base_url.to_string(),
        }
    }

    /// Every listed coin as `[{"id", "symbol", "name"}, ...]`.
    pub fn coins_list(&self) -> Result<Value, AppError> {
        self.source.get_json(&endpoint(&self.base_url, COINS_LIST), &[])
    }

    /// `prices`, `market_caps` and `total_volumes` as `[[epoch_ms, value], ...]`.
    pub fn market_chart(&self, coin_id: &str, currency: &str, days: i64) -> Result<Value, AppError> {
        let path = format!("coins/{coin_id}/market_chart");
        self.source.get_json(
            &endpoint(&self.base_url, &path),
            &[("vs_currency", currency.to_string()), ("days", days.to_string())],
        )
    }
}

impl<S: JsonSource> CoinLookup for CoinGeckoClient<S> {
    fn resolve_coin(&self, name: &str) -> Result<Option<String>, AppError> {
        Ok(find_coin_id(&self.coins_list()?, name))
    }
}
