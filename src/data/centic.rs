//! Centic API integration (wallet portfolios, credit scores, token rankings).

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;
use crate::data::lookup::{ChainLookup, find_chain_id};
use crate::data::source::{HttpSource, JsonSource, endpoint};
use crate::error::AppError;

const API_KEY_HEADER: &str = "x-apikey";

const PORTFOLIO_ASSET: &str = "portfolio/asset";
const PORTFOLIO_PERFORMANCE: &str = "portfolio/performance";
const PORTFOLIO_WALLET: &str = "portfolio/wallet";
const CREDIT_SCORE: &str = "credit-score";
const RANKING_TOKENS: &str = "ranking/tokens";
const COMMON_ANALYTICS: &str = "common/analytics";
const COMMON_CHAINS: &str = "common/chains";

/// Token ranking order accepted by `ranking/tokens`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum RankingCriteria {
    MarketCap,
    TradingVolume,
    TokenHealth,
    TradingVolumeChangeRate,
}

impl RankingCriteria {
    pub fn as_query(self) -> &'static str {
        match self {
            RankingCriteria::MarketCap => "marketCap",
            RankingCriteria::TradingVolume => "tradingVolume",
            RankingCriteria::TokenHealth => "tokenHealth",
            RankingCriteria::TradingVolumeChangeRate => "tradingVolumeChangeRate",
        }
    }
}

pub struct CenticClient<S = HttpSource> {
    source: S,
    base_url: String,
}

impl CenticClient<HttpSource> {
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let key = config.require_centic_key()?;
        let source = HttpSource::new("Centic").with_auth_header(API_KEY_HEADER, key);
        Ok(Self::new(source, &config.centic_base_url))
    }
}

impl<S: JsonSource> CenticClient<S> {
    pub fn new(source: S, base_url: &str) -> Self {
        Self {
            source,
            base_url: base_url.to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn source(&self) -> &S {
        &self.source
    }

    fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, AppError> {
        self.source.get_json(&endpoint(&self.base_url, path), query)
    }

    /// Asset value history of a wallet across supported chains.
    pub fn portfolio_asset(&self, address: &str) -> Result<Value, AppError> {
        self.get(PORTFOLIO_ASSET, &[("address", address.to_string())])
    }

    /// Performance, daily and cumulative P&L histories of a wallet.
    pub fn portfolio_performance(&self, address: &str) -> Result<Value, AppError> {
        self.get(PORTFOLIO_PERFORMANCE, &[("address", address.to_string())])
    }

    /// Token holdings of a wallet on one chain.
    pub fn portfolio_wallet(&self, address: &str, chain_id: &str) -> Result<Value, AppError> {
        self.get(
            PORTFOLIO_WALLET,
            &[("address", address.to_string()), ("chain", chain_id.to_string())],
        )
    }

    /// Current credit score plus its history ledger.
    pub fn credit_score(&self, address: &str) -> Result<Value, AppError> {
        self.get(CREDIT_SCORE, &[("address", address.to_string())])
    }

    pub fn token_ranking(
        &self,
        criteria: RankingCriteria,
        page_size: usize,
        duration_days: i64,
    ) -> Result<Value, AppError> {
        self.get(
            RANKING_TOKENS,
            &[
                ("order", "desc".to_string()),
                ("orderBy", criteria.as_query().to_string()),
                ("pageSize", page_size.to_string()),
                ("duration", duration_days.to_string()),
            ],
        )
    }

    pub fn token_analytics(&self, token_id: &str) -> Result<Value, AppError> {
        self.get(
            COMMON_ANALYTICS,
            &[("id", token_id.to_string()), ("type", "token".to_string())],
        )
    }

    pub fn chains(&self) -> Result<Value, AppError> {
        self.get(COMMON_CHAINS, &[])
    }
}

impl<S: JsonSource> ChainLookup for CenticClient<S> {
    fn resolve_chain(&self, name: &str) -> Result<Option<String>, AppError> {
        Ok(find_chain_id(&self.chains()?, name))
    }
}
