//! Upstream data sources.
//!
//! - transport (`source`)
//! - Centic wallet/token API (`centic`)
//! - CoinGecko market API (`coingecko`)
//! - name -> id lookup capabilities (`lookup`)

pub mod centic;
pub mod coingecko;
pub mod lookup;
pub mod source;

pub use centic::{CenticClient, RankingCriteria};
pub use coingecko::CoinGeckoClient;
pub use lookup::{ChainLookup, CoinLookup};
pub use source::{HttpSource, JsonSource};
