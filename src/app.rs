//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - runs the requested upstream query (or an offline reshape)
//! - prints the result or writes it to `--output`

use std::collections::HashSet;

use clap::Parser;
use rayon::prelude::*;
use serde_json::{Map, Value};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{AssetArgs, ChainIdArgs, CoinHistoryArgs, Command, HistoryArgs, NormalizeArgs, TopAssetsArgs, WalletArgs};
use crate::clock::UtcClock;
use crate::document::{parse_path, relocate_current, reshape};
use crate::error::AppError;
use crate::history::HistoryPipeline;
use crate::query;

pub mod context;

use context::AppContext;

/// What a command hands back for printing.
#[derive(Debug)]
pub enum Output {
    Json(Value),
    Text(String),
}

/// Entry point for the `wh` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();
    init_logging(cli.verbose);

    let ctx = AppContext::from_env();
    let output = match cli.command {
        Command::Asset(args) => handle_asset(&ctx, args)?,
        Command::Performance(args) => handle_performance(&ctx, args)?,
        Command::Wallet(args) => handle_wallet(&ctx, args)?,
        Command::CreditScore(args) => handle_credit_score(&ctx, args)?,
        Command::CoinHistory(args) => handle_coin_history(&ctx, args)?,
        Command::TopAssets(args) => handle_top_assets(&ctx, args)?,
        Command::ChainId(args) => handle_chain_id(&ctx, args)?,
        Command::Normalize(args) => handle_normalize(&ctx, args)?,
    };

    match (output, &cli.output) {
        (Output::Json(value), Some(path)) => {
            crate::io::write_json(path, &value)?;
            info!(path = %path.display(), "wrote result");
        }
        (Output::Json(value), None) => println!("{}", crate::io::to_pretty_string(&value)?),
        (Output::Text(text), Some(path)) => {
            crate::io::write_text(path, &text)?;
            info!(path = %path.display(), "wrote result");
        }
        (Output::Text(text), None) => print!("{text}"),
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    // A subscriber may already be installed when embedded; keep the existing one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Drop repeated addresses, keeping the first occurrence's position.
fn unique_addresses(addresses: &[String]) -> Vec<&str> {
    let mut seen = HashSet::with_capacity(addresses.len());
    addresses
        .iter()
        .map(String::as_str)
        .filter(|address| seen.insert(*address))
        .collect()
}

fn handle_asset(ctx: &AppContext, args: AssetArgs) -> Result<Output, AppError> {
    let centic = ctx.centic()?;
    let interval = args.window.interval;

    let addresses = unique_addresses(&args.addresses);
    if addresses.len() < args.addresses.len() {
        warn!(
            given = args.addresses.len(),
            unique = addresses.len(),
            "duplicate wallet addresses ignored"
        );
    }

    if let [address] = addresses.as_slice() {
        let doc = query::portfolio_asset(&centic, &ctx.pipeline, address, interval)?;
        return Ok(Output::Json(doc));
    }

    // Each wallet gets its own document; nothing is shared but the client.
    let docs: Vec<(String, Value)> = addresses
        .par_iter()
        .map(|address| {
            query::portfolio_asset(&centic, &ctx.pipeline, address, interval).map(|doc| (address.to_string(), doc))
        })
        .collect::<Result<_, AppError>>()?;

    Ok(Output::Json(Value::Object(docs.into_iter().collect::<Map<_, _>>())))
}

fn handle_performance(ctx: &AppContext, args: HistoryArgs) -> Result<Output, AppError> {
    let centic = ctx.centic()?;
    let doc = query::portfolio_performance(&centic, &ctx.pipeline, &args.address, args.window.interval)?;
    Ok(Output::Json(doc))
}

fn handle_wallet(ctx: &AppContext, args: WalletArgs) -> Result<Output, AppError> {
    let centic = ctx.centic()?;
    let doc = query::portfolio_wallet(&centic, &centic, &args.address, &args.chain)?;
    Ok(Output::Json(doc))
}

fn handle_credit_score(ctx: &AppContext, args: HistoryArgs) -> Result<Output, AppError> {
    let centic = ctx.centic()?;
    let doc = query::credit_score(&centic, &ctx.pipeline, &args.address, args.window.interval)?;
    Ok(Output::Json(doc))
}

fn handle_coin_history(ctx: &AppContext, args: CoinHistoryArgs) -> Result<Output, AppError> {
    let coingecko = ctx.coingecko();
    let doc = query::coin_history(
        &coingecko,
        &coingecko,
        &ctx.pipeline,
        &args.coin,
        &args.currency,
        args.days,
    )?;
    Ok(Output::Json(doc))
}

fn handle_top_assets(ctx: &AppContext, args: TopAssetsArgs) -> Result<Output, AppError> {
    let centic = ctx.centic()?;
    let docs = query::top_n_asset_performance(&centic, args.count, args.criteria, args.window.interval)?;
    Ok(Output::Json(docs))
}

fn handle_chain_id(ctx: &AppContext, args: ChainIdArgs) -> Result<Output, AppError> {
    let centic = ctx.centic()?;
    let id = query::chain_id_by_name(&centic, &args.name)?;
    Ok(Output::Text(format!("{id}\n")))
}

fn handle_normalize(ctx: &AppContext, args: NormalizeArgs) -> Result<Output, AppError> {
    let mut doc = crate::io::read_json_document(&args.input)?;
    let path = parse_path(&args.path);

    let utc_pipeline;
    let pipeline = if args.utc {
        utc_pipeline = HistoryPipeline::new(UtcClock);
        &utc_pipeline
    } else {
        &ctx.pipeline
    };

    if !args.current.is_empty() {
        let fields: Vec<&str> = args.current.iter().map(String::as_str).collect();
        relocate_current(&mut doc, &fields, &path, pipeline.clock().now_epoch())?;
    }
    let view = reshape(&mut doc, &path, args.window.interval, pipeline)?;
    info!("normalized {}", crate::report::format_series_summary(&args.path, &view));

    if let Some(csv) = &args.csv {
        crate::io::write_series_csv(csv, &view)?;
    }
    if args.table {
        return Ok(Output::Text(crate::report::format_series_table(&args.path, &view)));
    }
    Ok(Output::Json(doc))
}
