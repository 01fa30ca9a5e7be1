pub mod assemble;
pub mod config;
pub mod matcher;
pub mod setters;
pub mod verify;
pub mod wallets;

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::model::batch::{self, SafeBatchFile, SafeTransaction};
use crate::model::report::Report;
use crate::onchain::addresses;
use crate::onchain::{ChainReader, RpcReader};
use crate::quoter::{HttpQuoter, Quoter};
use crate::shortcuts::{Catalog, SetterInput};

use assemble::Assembled;
use config::RuntimeConfig;
use matcher::ShortcutIndex;
use setters::{DryRun, SetterCalls, SimulationContext};

/// CLI-facing config struct (before env var resolution).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub chain: String,
    pub market_hash: String,
    pub slippage: u64,
    pub skew_ratio: u64,
    pub min_amount0_bps: u64,
    pub min_amount1_bps: u64,
    pub strict_verification: bool,
    pub output_dir: PathBuf,
}

/// What a run produced.
#[derive(Debug)]
pub enum Outcome {
    /// Unverified market or every wallet already executed: report only.
    Simulated { shortcut: String, dry_run: DryRun },
    /// A deposit transaction was built, verified and written as a batch file.
    Built(Box<Built>),
}

#[derive(Debug)]
pub struct Built {
    pub shortcut: String,
    pub report: Report,
    pub setter_calls: SetterCalls,
    pub assembled: Assembled,
    pub batch: SafeBatchFile,
    pub batch_path: PathBuf,
}

impl Outcome {
    pub fn report(&self) -> &Report {
        match self {
            Outcome::Simulated { dry_run, .. } => &dry_run.report,
            Outcome::Built(built) => &built.report,
        }
    }
}

pub fn run(cli_config: &RunConfig) -> Result<()> {
    let config = RuntimeConfig::from_cli(cli_config)?;

    println!("=== yield-shortcuts build ===");
    println!("Chain: {} ({})", config.chain, config.chain.chain_id());
    println!("Market: {}", config.market_hash);
    println!();

    let rt = tokio::runtime::Runtime::new().context("creating tokio runtime")?;
    rt.block_on(run_async(config))
}

async fn run_async(config: RuntimeConfig) -> Result<()> {
    let reader = RpcReader::new(config.chain, &config.rpc_url)?;
    let quoter = HttpQuoter::new(&config.quoter_url)?;
    let catalog = Catalog::builtin();

    let outcome = build_transaction(&reader, &quoter, &catalog, &config).await?;
    print_outcome(&outcome)
}

// ── Workflow ───────────────────────────────────────────────────────

/// Read the campaign, match its shortcut, pick a wallet and either simulate
/// the recipe or build, verify and write the deposit transaction.
pub async fn build_transaction<R, Q>(
    reader: &R,
    quoter: &Q,
    catalog: &Catalog,
    config: &RuntimeConfig,
) -> Result<Outcome>
where
    R: ChainReader + ?Sized,
    Q: Quoter + ?Sized,
{
    let chain = config.chain;
    let market_hash = config.market_hash;
    let roles = addresses::roles(chain);

    // ReadCampaign
    let campaign = reader
        .campaign(market_hash)
        .await
        .with_context(|| format!("reading campaign {market_hash}"))?;
    if !campaign.verified {
        tracing::warn!(%market_hash, "market is not verified, simulating only");
    }

    // MatchShortcut
    let index = ShortcutIndex::build(catalog, chain)?;
    let (hash, matched) = index.lookup(campaign.receipt_token, &campaign.deposit_recipe)?;
    let shortcut = matched.shortcut;
    tracing::info!(shortcut = shortcut.name(), verification_hash = %hash, "matched shortcut");

    let onchain_hash = reader.campaign_verification_hash(market_hash).await?;
    matcher::check_onchain_hash(hash, onchain_hash, config.verification)?;

    // SelectWallet
    let (bridged, executed) = tokio::try_join!(
        reader.weiroll_wallets(market_hash),
        reader.executed_wallets(market_hash),
    )?;
    let selection = wallets::select_wallet(market_hash, &bridged, &executed)?;
    let wallet = selection.wallet;
    if selection.mock_amounts {
        tracing::warn!(
            %wallet,
            "all wallets have been executed, simulating with the last wallet's original deposit"
        );
    }
    if !selection.ignored.is_empty() {
        tracing::warn!(ignored = ?selection.ignored, "ignoring additional pending wallets");
    }

    let metadata = &matched.output.metadata;
    let (deposits, balances) = tokio::try_join!(
        reader.deposited_amounts(market_hash, wallet, &metadata.tokens_in),
        reader.balances(wallet, &metadata.tokens_in),
    )?;
    let amounts_in = wallets::effective_amounts(&deposits, &balances, selection.mock_amounts);
    for (token, amount) in metadata.tokens_in.iter().zip(&amounts_in) {
        tracing::info!(%wallet, %token, %amount, "weiroll wallet token balance");
    }

    let ctx = SimulationContext {
        chain,
        roles,
        owner: campaign.owner,
        wallet,
        output: &matched.output,
        amounts_in: &amounts_in,
    };

    // Simulate
    if !campaign.verified || selection.mock_amounts {
        let dry_run = setters::simulate_shortcut(quoter, shortcut, &ctx, &config.setter_args).await?;
        return Ok(Outcome::Simulated {
            shortcut: shortcut.name().to_string(),
            dry_run,
        });
    }

    // BuildTransaction
    tracing::info!(%wallet, "building transaction");
    let setter_values = setters::derive_setters(quoter, shortcut, &ctx, &config.setter_args).await?;
    let setter_calls = setters::setter_calls(roles.setter, &setter_values);

    let mut calls = setter_calls.calls.clone();
    calls.push(assemble::execute_deposit_call(
        roles.deposit_executor,
        market_hash,
        wallet,
    ));
    let assembled = Assembled::new(calls, roles.multicall)?;

    // VerifyQuote
    let tx = assembled.to_api_transaction(campaign.owner, wallet);
    let verified = verify::verify_transaction(quoter, chain, tx, metadata).await?;

    let min_amount_out = setter_values
        .get(&SetterInput::MinAmountOut)
        .copied()
        .unwrap_or_default();
    let report = Report::new(
        wallet,
        &amounts_in,
        min_amount_out,
        verified.quote,
        verified.dust,
        verified.gas,
    );

    // WriteBatchFile
    let mut transactions = setter_calls.safe_transactions.clone();
    transactions.push(SafeTransaction::execute_deposit_recipes(
        roles.deposit_executor,
        market_hash,
        &[wallet],
    ));
    let batch_file = batch::create_batch_file(chain, campaign.owner, transactions);
    let batch_path = batch::write_batch_file(&config.output_dir, market_hash, &batch_file)?;

    Ok(Outcome::Built(Box::new(Built {
        shortcut: shortcut.name().to_string(),
        report,
        setter_calls,
        assembled,
        batch: batch_file,
        batch_path,
    })))
}

// ── Output ─────────────────────────────────────────────────────────

fn print_outcome(outcome: &Outcome) -> Result<()> {
    match outcome {
        Outcome::Simulated { shortcut, dry_run } => {
            println!("Shortcut: {shortcut}");
            println!("Calldata:\n{}", serde_json::to_string_pretty(&dry_run.transactions)?);
            println!();
            println!("Simulation (Report):\n{}", serde_json::to_string_pretty(&dry_run.report)?);
        }
        Outcome::Built(built) => {
            println!("Shortcut: {}", built.shortcut);
            if !built.setter_calls.calls.is_empty() {
                println!(
                    "Setter Input Data:\n{}",
                    serde_json::to_string_pretty(&built.setter_calls.input_data)?
                );
                println!();
            }
            println!("Calls:\n{}", serde_json::to_string_pretty(built.assembled.calls())?);
            println!();
            println!("Simulation (Report):\n{}", serde_json::to_string_pretty(&built.report)?);
            println!();
            println!(
                "Safe Transaction Builder output saved to '{}'",
                built.batch_path.display()
            );
        }
    }
    Ok(())
}
