use std::collections::BTreeMap;

use alloy::primitives::{Address, U256};
use alloy::sol_types::SolCall;
use anyhow::Result;

use crate::error::Error;
use crate::model::batch::SafeTransaction;
use crate::model::chain::Chain;
use crate::model::report::Report;
use crate::onchain::abi::{ISetter, IWeirollWallet};
use crate::onchain::addresses::Roles;
use crate::quoter::{ApiTransaction, QuoteRequest, Quoter, quote_first};
use crate::shortcuts::{Output, SetterInput, Shortcut};

use super::assemble::Call;
use super::verify;

pub const MAX_BPS: u64 = 10_000;
pub const DEFAULT_SLIPPAGE_BPS: u64 = 3;
pub const DEFAULT_MIN_AMOUNT_BPS: u64 = 9_900;

/// Basis-point arguments feeding the setter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetterArgs {
    pub slippage: u64,
    pub skew_ratio: u64,
    pub min_amount0_bps: u64,
    pub min_amount1_bps: u64,
}

impl Default for SetterArgs {
    fn default() -> Self {
        SetterArgs {
            slippage: DEFAULT_SLIPPAGE_BPS,
            skew_ratio: MAX_BPS,
            min_amount0_bps: DEFAULT_MIN_AMOUNT_BPS,
            min_amount1_bps: DEFAULT_MIN_AMOUNT_BPS,
        }
    }
}

/// Setter values keyed by input, iterated in setter index order.
pub type Setters = BTreeMap<SetterInput, U256>;

/// `amount * (MAX_BPS - slippage) / MAX_BPS`, rounded down.
pub fn apply_slippage(amount: U256, slippage_bps: u64) -> U256 {
    let max = U256::from(MAX_BPS);
    let keep = U256::from(MAX_BPS.saturating_sub(slippage_bps));
    // split to stay clear of overflow on large amounts
    (amount / max) * keep + (amount % max) * keep / max
}

/// Everything a simulation needs besides the quoter.
#[derive(Debug, Clone, Copy)]
pub struct SimulationContext<'a> {
    pub chain: Chain,
    pub roles: &'a Roles,
    pub owner: Address,
    pub wallet: Address,
    pub output: &'a Output,
    pub amounts_in: &'a [U256],
}

impl SimulationContext<'_> {
    /// Setter writes from the owner, then the recipe run by the deposit
    /// executor on the wallet, funded with the wallet's input amounts.
    fn bundle(&self, setters: &Setters, token_out: Vec<Address>) -> QuoteRequest {
        let mut transactions: Vec<ApiTransaction> = setter_calls(self.roles.setter, setters)
            .calls
            .into_iter()
            .map(|c| ApiTransaction::call(self.owner, c.target, c.data))
            .collect();

        let script = &self.output.script;
        let execute = IWeirollWallet::executeWeirollCall {
            commands: script.commands.clone(),
            state: script.state.clone(),
        }
        .abi_encode();
        transactions.push(ApiTransaction {
            receiver: Some(self.wallet),
            executor: Some(self.wallet),
            ..ApiTransaction::call(self.roles.deposit_executor, self.wallet, execute.into())
        });

        QuoteRequest {
            chain_id: self.chain.chain_id(),
            transactions,
            token_in: self.output.metadata.tokens_in.clone(),
            token_out,
            amount_in: self.amounts_in.iter().map(|a| a.to_string()).collect(),
        }
    }
}

// ── Deriving values ────────────────────────────────────────────────

/// Resolve a value for each setter input the shortcut declares.
///
/// `minAmountOut` comes from simulating the recipe with a zero minimum and
/// taking `slippage` off the first output amount.
pub async fn derive_setters<Q: Quoter + ?Sized>(
    quoter: &Q,
    shortcut: &dyn Shortcut,
    ctx: &SimulationContext<'_>,
    args: &SetterArgs,
) -> Result<Setters> {
    let mut setters: Setters = shortcut
        .setter_inputs()
        .iter()
        .map(|input| {
            let value = match input {
                SetterInput::MinAmountOut => 0,
                SetterInput::MinAmount0Bps => args.min_amount0_bps,
                SetterInput::MinAmount1Bps => args.min_amount1_bps,
                SetterInput::SkewRatio => args.skew_ratio,
            };
            (*input, U256::from(value))
        })
        .collect();

    if setters.contains_key(&SetterInput::MinAmountOut) {
        let receipt_token = ctx.output.receipt_token();
        let request = ctx.bundle(&setters, ctx.output.metadata.tokens_out.clone());
        let quote = quote_first(quoter, &request).await?;
        let amount_out = quote
            .amount(0)
            .ok_or(Error::MissingQuoteAmount(receipt_token))?;
        let min_amount_out = apply_slippage(amount_out, args.slippage);
        tracing::info!(%amount_out, %min_amount_out, slippage = args.slippage, "derived minAmountOut");
        setters.insert(SetterInput::MinAmountOut, min_amount_out);
    }

    Ok(setters)
}

// ── Setter calldata ────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetterCalls {
    pub calls: Vec<Call>,
    /// Setter name → value, for display.
    pub input_data: BTreeMap<String, String>,
    pub safe_transactions: Vec<SafeTransaction>,
}

/// One `setSingleValue(index, value)` per setter, in index order.
pub fn setter_calls(setter: Address, setters: &Setters) -> SetterCalls {
    let mut out = SetterCalls::default();
    for (input, value) in setters {
        let index = U256::from(input.index());
        let data = ISetter::setSingleValueCall {
            index,
            value: *value,
        }
        .abi_encode();

        out.calls.push(Call::new(setter, data));
        out.input_data.insert(input.name().to_string(), value.to_string());
        out.safe_transactions.push(SafeTransaction::method(
            setter,
            "setSingleValue",
            &[
                ("index", "uint256", index.to_string()),
                ("value", "uint256", value.to_string()),
            ],
        ));
    }
    out
}

// ── Dry run ────────────────────────────────────────────────────────

/// Report plus the simulated transactions, for display.
#[derive(Debug, Clone)]
pub struct DryRun {
    pub report: Report,
    pub setters: Setters,
    pub transactions: Vec<ApiTransaction>,
}

/// Simulate the recipe end to end without building a deposit transaction.
pub async fn simulate_shortcut<Q: Quoter + ?Sized>(
    quoter: &Q,
    shortcut: &dyn Shortcut,
    ctx: &SimulationContext<'_>,
    args: &SetterArgs,
) -> Result<DryRun> {
    let setters = derive_setters(quoter, shortcut, ctx, args).await?;

    let metadata = &ctx.output.metadata;
    let request = ctx.bundle(&setters, verify::quote_tokens(metadata));
    let quote = quote_first(quoter, &request).await?;
    let (quote_map, dust) = verify::split_amounts(metadata, &quote)?;

    let min_amount_out = setters
        .get(&SetterInput::MinAmountOut)
        .copied()
        .unwrap_or_default();
    let report = Report::new(
        ctx.wallet,
        ctx.amounts_in,
        min_amount_out,
        quote_map,
        dust,
        quote.gas,
    );

    Ok(DryRun {
        report,
        setters,
        transactions: request.transactions,
    })
}
