use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::run::setters::{DEFAULT_MIN_AMOUNT_BPS, DEFAULT_SLIPPAGE_BPS, MAX_BPS};

/// Yield shortcuts: match Royco deposit campaigns to their recipes, simulate
/// them, and build Safe transaction batches that execute them.
#[derive(Parser)]
#[command(name = "yield-shortcuts", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

fn bps(raw: &str) -> Result<u64, String> {
    let value: u64 = raw
        .parse()
        .map_err(|_| format!("`{raw}` is not a whole number of basis points"))?;
    if value > MAX_BPS {
        return Err(format!("must be between 0 and {MAX_BPS}"));
    }
    Ok(value)
}

#[derive(Subcommand)]
pub enum Command {
    /// Build (or simulate) the deposit transaction for a market
    Build {
        /// Chain name (cartio or berachain)
        chain: String,

        /// Source market hash (0x-prefixed, 32 bytes)
        market_hash: String,

        /// Slippage applied to the simulated output (basis points)
        #[arg(long, default_value_t = DEFAULT_SLIPPAGE_BPS, value_parser = bps)]
        slippage: u64,

        /// Skew ratio for recipes that split deposits (basis points)
        #[arg(long = "skewRatio", default_value_t = MAX_BPS, value_parser = bps)]
        skew_ratio: u64,

        /// Minimum share of the first token accepted on deposit (basis points)
        #[arg(long = "minAmount0Bps", default_value_t = DEFAULT_MIN_AMOUNT_BPS, value_parser = bps)]
        min_amount0_bps: u64,

        /// Minimum share of the second token accepted on deposit (basis points)
        #[arg(long = "minAmount1Bps", default_value_t = DEFAULT_MIN_AMOUNT_BPS, value_parser = bps)]
        min_amount1_bps: u64,

        /// Fail when the on-chain verification hash differs from the calculated one
        #[arg(long)]
        strict_verification: bool,

        /// Directory for the Safe Transaction Builder file
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Print the verification hash of each shortcut on a chain
    Hash {
        /// Chain name (cartio or berachain)
        chain: String,

        /// Only this shortcut
        #[arg(long)]
        shortcut: Option<String>,
    },

    /// List available shortcuts, their chains and setter inputs
    List {
        /// Only shortcuts supporting this chain
        #[arg(long)]
        chain: Option<String>,
    },
}
