//! Command-line parsing for the wallet history aggregator.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! upstream queries and the history normalizer.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::data::RankingCriteria;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "wh", version, about = "On-chain wallet and token history (Centic + CoinGecko)")]
pub struct Cli {
    /// Write the result (JSON or text) to a file instead of stdout.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Daily asset totals of one or more wallets.
    Asset(AssetArgs),
    /// Daily performance and P&L of a wallet.
    Performance(HistoryArgs),
    /// Token holdings of a wallet on one chain.
    Wallet(WalletArgs),
    /// Credit score history of a wallet, ending with today's score.
    CreditScore(HistoryArgs),
    /// Daily price, market cap and volume of a coin.
    CoinHistory(CoinHistoryArgs),
    /// Top-N tokens by a ranking criteria, with analytics.
    TopAssets(TopAssetsArgs),
    /// Look up a Centic chain id by chain name.
    ChainId(ChainIdArgs),
    /// Reshape an epoch-keyed ledger inside a saved JSON document (offline).
    Normalize(NormalizeArgs),
}

/// Look-back window shared by every history command.
#[derive(Debug, Args, Clone, Copy)]
pub struct IntervalArg {
    /// Days of history to keep (one extra day is always included).
    #[arg(short, long, default_value_t = 6, allow_negative_numbers = true)]
    pub interval: i64,
}

#[derive(Debug, Args)]
pub struct AssetArgs {
    /// Wallet address(es); several are fetched in parallel, repeats only once.
    #[arg(short, long = "address", value_name = "ADDRESS", num_args = 1.., required = true)]
    pub addresses: Vec<String>,

    #[command(flatten)]
    pub window: IntervalArg,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Wallet address.
    #[arg(short, long)]
    pub address: String,

    #[command(flatten)]
    pub window: IntervalArg,
}

#[derive(Debug, Args)]
pub struct WalletArgs {
    /// Wallet address.
    #[arg(short, long)]
    pub address: String,

    /// Chain id (`0x1`) or chain name (`Ethereum`).
    #[arg(short, long, default_value = "0x1")]
    pub chain: String,
}

#[derive(Debug, Args)]
pub struct CoinHistoryArgs {
    /// Coin name as listed on CoinGecko (case-insensitive).
    #[arg(long)]
    pub coin: String,

    /// Quote currency.
    #[arg(long, default_value = "usd")]
    pub currency: String,

    /// Days of history to request and keep.
    #[arg(short, long, default_value_t = 6, allow_negative_numbers = true)]
    pub days: i64,
}

#[derive(Debug, Args)]
pub struct TopAssetsArgs {
    /// Number of tokens.
    #[arg(short = 'n', long, default_value_t = 10)]
    pub count: usize,

    /// Ranking criteria.
    #[arg(long, value_enum, default_value_t = RankingCriteria::MarketCap)]
    pub criteria: RankingCriteria,

    #[command(flatten)]
    pub window: IntervalArg,
}

#[derive(Debug, Args)]
pub struct ChainIdArgs {
    /// Chain name, matched exactly.
    #[arg(long)]
    pub name: String,
}

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// JSON document to read.
    #[arg(long, value_name = "JSON")]
    pub input: PathBuf,

    /// Dotted key path of the epoch-keyed ledger (e.g. `data.asset`).
    #[arg(long)]
    pub path: String,

    /// Top-level field to move into the ledger under the current time first.
    /// Repeatable.
    #[arg(long = "current", value_name = "FIELD")]
    pub current: Vec<String>,

    #[command(flatten)]
    pub window: IntervalArg,

    /// Render timestamps in UTC instead of the local time zone.
    #[arg(long)]
    pub utc: bool,

    /// Also export the reshaped ledger to CSV.
    #[arg(long, value_name = "CSV")]
    pub csv: Option<PathBuf>,

    /// Print the ledger as a table instead of the whole document.
    #[arg(long)]
    pub table: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn asset_takes_several_addresses() {
        let cli = Cli::parse_from(["wh", "asset", "-a", "0xaaa", "0xbbb", "--interval", "30"]);
        match cli.command {
            Command::Asset(args) => {
                assert_eq!(args.addresses, ["0xaaa", "0xbbb"]);
                assert_eq!(args.window.interval, 30);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn criteria_parse_from_kebab_case() {
        let cli = Cli::parse_from(["wh", "top-assets", "--criteria", "trading-volume-change-rate", "-n", "3"]);
        match cli.command {
            Command::TopAssets(args) => {
                assert_eq!(args.criteria, RankingCriteria::TradingVolumeChangeRate);
                assert_eq!(args.count, 3);
                assert_eq!(args.window.interval, 6);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn normalize_collects_current_fields() {
        let cli = Cli::parse_from([
            "wh", "-o", "out.json", "normalize", "--input", "in.json", "--path", "creditScoreHistory",
            "--current", "creditScore", "--utc",
        ]);
        assert_eq!(cli.output, Some(PathBuf::from("out.json")));
        match cli.command {
            Command::Normalize(args) => {
                assert_eq!(args.current, ["creditScore"]);
                assert!(args.utc);
                assert!(!args.table);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
