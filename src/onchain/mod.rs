pub mod abi;
pub mod addresses;
pub mod logs;

use alloy::primitives::{Address, B256, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::sol_types::SolEvent;
use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::future::try_join_all;

use crate::model::campaign::Campaign;
use crate::model::chain::Chain;

use abi::{IDepositExecutor, IERC20};

// ── Reader trait ───────────────────────────────────────────────────

/// Read-only view of a chain's deposit executor and token state.
#[async_trait]
pub trait ChainReader: Send + Sync {
    async fn campaign(&self, market_hash: B256) -> Result<Campaign>;

    /// Verification hash the executor reports for the campaign.
    async fn campaign_verification_hash(&self, market_hash: B256) -> Result<B256>;

    /// Weiroll wallets bridged for the market, in bridge order.
    async fn weiroll_wallets(&self, market_hash: B256) -> Result<Vec<Address>>;

    /// Wallets whose deposit recipe has already been executed.
    async fn executed_wallets(&self, market_hash: B256) -> Result<Vec<Address>>;

    /// Recorded deposit per token for a wallet, in `tokens` order.
    async fn deposited_amounts(
        &self,
        market_hash: B256,
        wallet: Address,
        tokens: &[Address],
    ) -> Result<Vec<U256>>;

    /// Current ERC-20 balance per token for `owner`, in `tokens` order.
    async fn balances(&self, owner: Address, tokens: &[Address]) -> Result<Vec<U256>>;
}

// ── RPC implementation ─────────────────────────────────────────────

pub struct RpcReader {
    provider: DynProvider,
    deposit_executor: Address,
    from_block: u64,
}

impl RpcReader {
    pub fn new(chain: Chain, rpc_url: &str) -> Result<Self> {
        let provider = ProviderBuilder::new()
            .connect_http(
                rpc_url
                    .parse()
                    .with_context(|| format!("Invalid RPC URL for chain {chain}: {rpc_url}"))?,
            )
            .erased();

        Ok(RpcReader {
            provider,
            deposit_executor: addresses::roles(chain).deposit_executor,
            from_block: addresses::deposit_executor_creation_block(chain),
        })
    }
}

#[async_trait]
impl ChainReader for RpcReader {
    async fn campaign(&self, market_hash: B256) -> Result<Campaign> {
        let executor = IDepositExecutor::new(self.deposit_executor, &self.provider);
        let c = executor
            .sourceMarketHashToDepositCampaign(market_hash)
            .call()
            .await
            .context("sourceMarketHashToDepositCampaign call failed")?;

        Ok(Campaign {
            owner: c.owner,
            verified: c.verified,
            num_input_tokens: c.numInputTokens,
            receipt_token: c.receiptToken,
            unlock_timestamp: c.unlockTimestamp,
            deposit_recipe: c.depositRecipe,
        })
    }

    async fn campaign_verification_hash(&self, market_hash: B256) -> Result<B256> {
        let executor = IDepositExecutor::new(self.deposit_executor, &self.provider);
        executor
            .getCampaignVerificationHash(market_hash)
            .call()
            .await
            .context("getCampaignVerificationHash call failed")
    }

    async fn weiroll_wallets(&self, market_hash: B256) -> Result<Vec<Address>> {
        let logs = logs::scan_market_logs(
            &self.provider,
            self.deposit_executor,
            IDepositExecutor::CCDMBridgeProcessed::SIGNATURE_HASH,
            market_hash,
            self.from_block,
        )
        .await?;

        let wallets = logs
            .iter()
            .map(|log| {
                log.log_decode::<IDepositExecutor::CCDMBridgeProcessed>()
                    .map(|decoded| decoded.inner.data.weirollWallet)
                    .context("decoding CCDMBridgeProcessed log")
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(logs::unique_in_order(wallets))
    }

    async fn executed_wallets(&self, market_hash: B256) -> Result<Vec<Address>> {
        let logs = logs::scan_market_logs(
            &self.provider,
            self.deposit_executor,
            IDepositExecutor::WeirollWalletsExecutedDepositRecipe::SIGNATURE_HASH,
            market_hash,
            self.from_block,
        )
        .await?;

        let mut wallets = Vec::new();
        for log in &logs {
            let decoded = log
                .log_decode::<IDepositExecutor::WeirollWalletsExecutedDepositRecipe>()
                .context("decoding WeirollWalletsExecutedDepositRecipe log")?;
            wallets.extend(decoded.inner.data.weirollWalletsExecuted);
        }

        Ok(logs::unique_in_order(wallets))
    }

    async fn deposited_amounts(
        &self,
        market_hash: B256,
        wallet: Address,
        tokens: &[Address],
    ) -> Result<Vec<U256>> {
        let executor = IDepositExecutor::new(self.deposit_executor, &self.provider);
        try_join_all(tokens.iter().map(|token| {
            let call = executor.getTotalTokenAmountDepositedInWeirollWallet(market_hash, wallet, *token);
            async move {
                call.call()
                    .await
                    .with_context(|| format!("deposited amount of {token} in {wallet}"))
            }
        }))
        .await
    }

    async fn balances(&self, owner: Address, tokens: &[Address]) -> Result<Vec<U256>> {
        try_join_all(tokens.iter().map(|token| {
            let erc20 = IERC20::new(*token, &self.provider);
            async move {
                erc20
                    .balanceOf(owner)
                    .call()
                    .await
                    .with_context(|| format!("balanceOf({owner}) on {token}"))
            }
        }))
        .await
    }
}
