//! Shared per-run state: configuration plus the history pipeline.
//!
//! Upstream clients are built on demand so that offline commands never need
//! credentials and a missing Centic key only fails Centic commands.

use crate::config::Config;
use crate::data::{CenticClient, CoinGeckoClient};
use crate::error::AppError;
use crate::history::HistoryPipeline;

pub struct AppContext {
    pub config: Config,
    pub pipeline: HistoryPipeline,
}

impl AppContext {
    pub fn from_env() -> Self {
        Self {
            config: Config::from_env(),
            pipeline: HistoryPipeline::default(),
        }
    }

    pub fn centic(&self) -> Result<CenticClient, AppError> {
        CenticClient::from_config(&self.config)
    }

    pub fn coingecko(&self) -> CoinGeckoClient {
        CoinGeckoClient::from_config(&self.config)
    }
}
