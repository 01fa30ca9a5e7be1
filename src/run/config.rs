use std::path::PathBuf;
use std::str::FromStr;

use alloy::primitives::B256;
use anyhow::{Result, bail};

use crate::error::Error;
use crate::model::chain::Chain;
use crate::quoter::DEFAULT_QUOTER_URL;

use super::matcher::VerificationPolicy;
use super::setters::{MAX_BPS, SetterArgs};

pub const RPC_URL_ENV: &str = "SHORTCUTS_RPC_URL";
pub const QUOTER_URL_ENV: &str = "SHORTCUTS_QUOTER_URL";

/// Runtime configuration for the `build` command.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub chain: Chain,
    pub market_hash: B256,
    pub rpc_url: String,
    pub quoter_url: String,
    pub setter_args: SetterArgs,
    pub verification: VerificationPolicy,
    pub output_dir: PathBuf,
}

impl RuntimeConfig {
    pub fn from_cli(cli: &crate::run::RunConfig) -> Result<Self> {
        let chain = Chain::from_str(&cli.chain)?;
        let market_hash = parse_market_hash(&cli.market_hash)?;

        let rpc_url = env_or(RPC_URL_ENV, chain.default_rpc_url());
        let quoter_url = env_or(QUOTER_URL_ENV, DEFAULT_QUOTER_URL);

        let setter_args = SetterArgs {
            slippage: cli.slippage,
            skew_ratio: cli.skew_ratio,
            min_amount0_bps: cli.min_amount0_bps,
            min_amount1_bps: cli.min_amount1_bps,
        };
        for (name, bps) in [
            ("slippage", setter_args.slippage),
            ("skewRatio", setter_args.skew_ratio),
            ("minAmount0Bps", setter_args.min_amount0_bps),
            ("minAmount1Bps", setter_args.min_amount1_bps),
        ] {
            if bps > MAX_BPS {
                bail!("--{name} must be between 0 and {MAX_BPS} basis points, got {bps}");
            }
        }

        let verification = if cli.strict_verification {
            VerificationPolicy::Strict
        } else {
            VerificationPolicy::Lenient
        };

        Ok(RuntimeConfig {
            chain,
            market_hash,
            rpc_url,
            quoter_url,
            setter_args,
            verification,
            output_dir: cli.output_dir.clone(),
        })
    }
}

pub fn parse_market_hash(raw: &str) -> Result<B256, Error> {
    if !raw.starts_with("0x") {
        return Err(Error::InvalidMarketHash(raw.to_string()));
    }
    B256::from_str(raw).map_err(|_| Error::InvalidMarketHash(raw.to_string()))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
