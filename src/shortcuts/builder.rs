use alloy::primitives::{Address, U256};

use crate::error::{Error, Result};
use crate::model::chain::Chain;
use crate::onchain::abi::{
    IERC20, IErc4626, IHoneyFactory, IKodiakIslandRouter, INectPsm, ISatlayerPool, ISetter,
    IShortcutHelpers,
};
use crate::onchain::addresses::{self, DeFiAddresses, Roles};
use crate::weiroll::{Call, Planner, Value};

use super::{Metadata, Output, SetterInput};

/// Builds a recipe for one chain, the way each shortcut composes its steps.
pub struct RecipeBuilder {
    name: &'static str,
    chain: Chain,
    planner: Planner,
    metadata: Metadata,
    wallet: Option<Value>,
}

impl RecipeBuilder {
    pub fn new(
        name: &'static str,
        chain: Chain,
        tokens_in: Vec<Address>,
        tokens_out: Vec<Address>,
    ) -> Self {
        RecipeBuilder {
            name,
            chain,
            planner: Planner::new(),
            metadata: Metadata {
                tokens_in,
                tokens_out,
            },
            wallet: None,
        }
    }

    pub fn chain(&self) -> Chain {
        self.chain
    }

    pub fn roles(&self) -> &'static Roles {
        addresses::roles(self.chain)
    }

    pub fn defi(&self) -> &'static DeFiAddresses {
        addresses::defi_addresses(self.chain)
    }

    pub fn planner(&mut self) -> &mut Planner {
        &mut self.planner
    }

    /// Address of the executing weiroll wallet, resolved at execution time.
    pub fn wallet_address(&mut self) -> Result<Value> {
        if let Some(wallet) = self.wallet {
            return Ok(wallet);
        }
        let helpers = self.roles().helpers;
        let wallet = self
            .planner
            .add(Call::static_call::<IShortcutHelpers::senderCall>(helpers, vec![]))?;
        self.wallet = Some(wallet);
        Ok(wallet)
    }

    /// The wallet's balance of `token`.
    pub fn balance_of(&mut self, token: Address) -> Result<Value> {
        let wallet = self.wallet_address()?;
        self.planner
            .add(Call::static_call::<IERC20::balanceOfCall>(token, vec![wallet]))
    }

    /// Value written to the setter contract for `input`.
    pub fn setter_value(&mut self, input: SetterInput) -> Result<Value> {
        let setter = self.roles().setter;
        self.planner.add(Call::static_call::<ISetter::getValueCall>(
            setter,
            vec![U256::from(input.index()).into()],
        ))
    }

    pub fn approve(&mut self, token: Address, spender: Address, amount: Value) -> Result<()> {
        self.planner.add_void(Call::call::<IERC20::approveCall>(
            token,
            vec![spender.into(), amount],
        ))
    }

    /// Revert unless `amount` reaches the `minAmountOut` setter value.
    pub fn ensure_min_amount_out(&mut self, amount: Value) -> Result<()> {
        let min = self.setter_value(SetterInput::MinAmountOut)?;
        let helpers = self.roles().helpers;
        self.planner.add_void(Call::static_call::<IShortcutHelpers::ensureMinAmountCall>(
            helpers,
            vec![amount, min],
        ))
    }

    /// Approve and deposit into an ERC-4626 vault; returns minted shares.
    pub fn deposit_erc4626(&mut self, asset: Address, vault: Address, amount: Value) -> Result<Value> {
        let wallet = self.wallet_address()?;
        self.approve(asset, vault, amount)?;
        self.planner
            .add(Call::call::<IErc4626::depositCall>(vault, vec![amount, wallet]))
    }

    /// Add liquidity to a Kodiak island through the island router.
    ///
    /// Per-token minimums are `amount * minAmountXBps / 10_000`; the share
    /// minimum is the `minAmountOut` setter value when the recipe declares it.
    pub fn deposit_kodiak(
        &mut self,
        island: Address,
        tokens: [Address; 2],
        amounts: [Value; 2],
        setter_inputs: &[SetterInput],
    ) -> Result<()> {
        let router = self.defi().kodiak_router;
        let helpers = self.roles().helpers;
        let wallet = self.wallet_address()?;

        for (token, amount) in tokens.iter().zip(amounts) {
            self.approve(*token, router, amount)?;
        }

        let mut mins = Vec::with_capacity(2);
        for (amount, bps_input) in amounts
            .into_iter()
            .zip([SetterInput::MinAmount0Bps, SetterInput::MinAmount1Bps])
        {
            let min = if setter_inputs.contains(&bps_input) {
                let bps = self.setter_value(bps_input)?;
                self.planner.add(Call::static_call::<IShortcutHelpers::applyBpsCall>(
                    helpers,
                    vec![amount, bps],
                ))?
            } else {
                Value::from(U256::ZERO)
            };
            mins.push(min);
        }

        let min_shares = if setter_inputs.contains(&SetterInput::MinAmountOut) {
            self.setter_value(SetterInput::MinAmountOut)?
        } else {
            Value::from(U256::ZERO)
        };

        self.planner
            .add_void(Call::call::<IKodiakIslandRouter::addLiquidityCall>(
                router,
                vec![
                    island.into(),
                    amounts[0],
                    amounts[1],
                    mins[0],
                    mins[1],
                    min_shares,
                    wallet,
                ],
            ))
    }

    /// Mint HONEY from `asset`; returns the minted amount.
    pub fn mint_honey(&mut self, asset: Address, amount: Value) -> Result<Value> {
        let factory = self.defi().honey_factory;
        let wallet = self.wallet_address()?;
        self.approve(asset, factory, amount)?;
        self.planner.add(Call::call::<IHoneyFactory::mintCall>(
            factory,
            vec![asset.into(), amount, wallet, false.into()],
        ))
    }

    /// Redeem HONEY back into `asset`.
    pub fn redeem_honey(&mut self, asset: Address, amount: Value) -> Result<()> {
        let factory = self.defi().honey_factory;
        let honey = self.defi().honey;
        let wallet = self.wallet_address()?;
        self.approve(honey, factory, amount)?;
        self.planner.add_void(Call::call::<IHoneyFactory::redeemCall>(
            factory,
            vec![asset.into(), amount, wallet, false.into()],
        ))
    }

    /// Mint NECT from USDC through the PSM; returns the minted amount.
    pub fn mint_nect(&mut self, usdc_amount: Value) -> Result<Value> {
        let psm = self.defi().nect_psm;
        let usdc = self.defi().usdc;
        let wallet = self.wallet_address()?;
        self.approve(usdc, psm, usdc_amount)?;
        self.planner.add(Call::call::<INectPsm::depositCall>(
            psm,
            vec![usdc.into(), usdc_amount, wallet],
        ))
    }

    /// Redeem leftover NECT back to USDC.
    pub fn redeem_nect(&mut self, nect_amount: Value) -> Result<()> {
        let psm = self.defi().nect_psm;
        let usdc = self.defi().usdc;
        let nect = self.defi().nect;
        let wallet = self.wallet_address()?;
        self.approve(nect, psm, nect_amount)?;
        self.planner.add_void(Call::call::<INectPsm::withdrawCall>(
            psm,
            vec![usdc.into(), nect_amount, wallet],
        ))
    }

    /// Deposit into a SatLayer pool; returns the wallet's receipt token balance.
    pub fn deposit_satlayer(
        &mut self,
        token: Address,
        receipt_token: Address,
        vault: Address,
        amount: Value,
    ) -> Result<Value> {
        let wallet = self.wallet_address()?;
        self.approve(token, vault, amount)?;
        self.planner.add_void(Call::call::<ISatlayerPool::depositForCall>(
            vault,
            vec![token.into(), wallet, amount],
        ))?;
        self.balance_of(receipt_token)
    }

    pub fn build(self) -> Result<Output> {
        if self.metadata.tokens_in.is_empty() || self.metadata.tokens_out.is_empty() {
            return Err(Error::EmptyShortcutTokens(self.name.to_string()));
        }
        Ok(Output {
            script: self.planner.compile(),
            metadata: self.metadata,
        })
    }
}
