//! Wallet queries against Centic.
//!
//! Each query fetches one document, reshapes its epoch-keyed ledgers in
//! place and returns the whole document.

use serde_json::Value;
use tracing::info;

use crate::data::{CenticClient, ChainLookup, JsonSource};
use crate::document::{relocate_current, reshape};
use crate::error::AppError;
use crate::history::HistoryPipeline;
use crate::report::format_series_summary;

pub const ASSET_LEDGER: &str = "asset";
pub const PERFORMANCE_LEDGERS: [&str; 3] = ["performance", "dailyPAndL", "cumulativePAndL"];
pub const CREDIT_SCORE_FIELDS: [&str; 1] = ["creditScore"];
pub const CREDIT_SCORE_LEDGER: &str = "creditScoreHistory";

/// Daily asset totals of a wallet over the last `interval_days` (+1) days.
pub fn portfolio_asset<S: JsonSource>(
    centic: &CenticClient<S>,
    pipeline: &HistoryPipeline,
    address: &str,
    interval_days: i64,
) -> Result<Value, AppError> {
    pipeline.check_interval(interval_days)?;
    let mut doc = centic.portfolio_asset(address)?;
    let view = reshape(&mut doc, &[ASSET_LEDGER], interval_days, pipeline)?;
    info!(address, "portfolio asset {}", format_series_summary(ASSET_LEDGER, &view));
    Ok(doc)
}

/// Daily performance and P&L ledgers of a wallet.
pub fn portfolio_performance<S: JsonSource>(
    centic: &CenticClient<S>,
    pipeline: &HistoryPipeline,
    address: &str,
    interval_days: i64,
) -> Result<Value, AppError> {
    pipeline.check_interval(interval_days)?;
    let mut doc = centic.portfolio_performance(address)?;
    for ledger in PERFORMANCE_LEDGERS {
        let view = reshape(&mut doc, &[ledger], interval_days, pipeline)?;
        info!(address, "portfolio performance {}", format_series_summary(ledger, &view));
    }
    Ok(doc)
}

/// Token holdings of a wallet on one chain, unmodified.
///
/// `chain` is either a chain id (`0x1`) or a chain name resolved through
/// `chains`.
pub fn portfolio_wallet<S: JsonSource>(
    centic: &CenticClient<S>,
    chains: &dyn ChainLookup,
    address: &str,
    chain: &str,
) -> Result<Value, AppError> {
    let chain_id = if chain.starts_with("0x") {
        chain.to_string()
    } else {
        chain_id_by_name(chains, chain)?
    };
    centic.portfolio_wallet(address, &chain_id)
}

/// Credit score history with today's score appended.
///
/// The current `creditScore` moves into the history ledger under the present
/// epoch before the ledger is normalized, so the returned series always ends
/// with today's value.
pub fn credit_score<S: JsonSource>(
    centic: &CenticClient<S>,
    pipeline: &HistoryPipeline,
    address: &str,
    interval_days: i64,
) -> Result<Value, AppError> {
    pipeline.check_interval(interval_days)?;
    let mut doc = centic.credit_score(address)?;
    let now = pipeline.clock().now_epoch();
    relocate_current(&mut doc, &CREDIT_SCORE_FIELDS, &[CREDIT_SCORE_LEDGER], now)?;
    let view = reshape(&mut doc, &[CREDIT_SCORE_LEDGER], interval_days, pipeline)?;
    info!(address, "credit score {}", format_series_summary(CREDIT_SCORE_LEDGER, &view));
    Ok(doc)
}

pub fn chain_id_by_name(chains: &dyn ChainLookup, name: &str) -> Result<String, AppError> {
    chains
        .resolve_chain(name)?
        .ok_or_else(|| AppError::new(2, format!("Chain '{name}' not found in the Centic chain list.")))
}
