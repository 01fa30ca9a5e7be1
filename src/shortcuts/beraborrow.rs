use alloy::primitives::{Address, address};

use crate::error::Result;
use crate::model::chain::Chain;
use crate::onchain::addresses::defi_addresses;

use super::{AddressData, Output, RecipeBuilder, SetterInput, Shortcut, chains_where, unsupported};

const KODIAK_SETTERS: &[SetterInput] = &[
    SetterInput::MinAmountOut,
    SetterInput::MinAmount0Bps,
    SetterInput::MinAmount1Bps,
];

// ── NECT / USDe island ─────────────────────────────────────────────

/// Mints NECT from USDC and pairs it with USDe in a Kodiak island.
pub struct BeraborrowNectUsde;

struct NectUsdeInputs {
    nect: Address,
    usde: Address,
    usdc: Address,
    island: Address,
}

impl BeraborrowNectUsde {
    fn inputs(chain: Chain) -> Option<NectUsdeInputs> {
        let defi = defi_addresses(chain);
        let island = match chain {
            Chain::Cartio => address!("0x0d81a1E72950575e0df6228E528F362cc5d169c4"),
            Chain::Berachain => address!("0x78F87aA41a4C32a619467d5B36e0319F3EAf2DA2"),
        };
        Some(NectUsdeInputs {
            nect: defi.nect,
            usde: defi.usde,
            usdc: defi.usdc,
            island,
        })
    }
}

impl Shortcut for BeraborrowNectUsde {
    fn name(&self) -> &'static str {
        "beraborrow-nect-usde"
    }

    fn supported_chains(&self) -> Vec<Chain> {
        chains_where(|c| Self::inputs(c).is_some())
    }

    fn setter_inputs(&self) -> &'static [SetterInput] {
        KODIAK_SETTERS
    }

    fn build(&self, chain: Chain) -> Result<Output> {
        let i = Self::inputs(chain).ok_or_else(|| unsupported(self.name(), chain))?;
        let mut b = RecipeBuilder::new(self.name(), chain, vec![i.usdc, i.usde], vec![i.island]);

        let usde_amount = b.balance_of(i.usde)?;
        let usdc_amount = b.balance_of(i.usdc)?;
        let minted = b.mint_nect(usdc_amount)?;

        b.deposit_kodiak(
            i.island,
            [i.nect, i.usde],
            [minted, usde_amount],
            self.setter_inputs(),
        )?;

        let leftovers = b.balance_of(i.nect)?;
        b.redeem_nect(leftovers)?;

        b.build()
    }

    fn address_data(&self, chain: Chain) -> Result<Vec<(Address, AddressData)>> {
        let i = Self::inputs(chain).ok_or_else(|| unsupported(self.name(), chain))?;
        Ok(vec![
            (i.usde, AddressData::new("ERC20:USDE")),
            (i.usdc, AddressData::new("ERC20:USDC")),
            (i.nect, AddressData::new("ERC20:NECT")),
            (i.island, AddressData::new("Kodiak Island-nect-USDE-0.3%")),
            (
                defi_addresses(chain).kodiak_router,
                AddressData::new("Kodiak Island Router"),
            ),
        ])
    }
}

// ── WETH / HONEY island vault ──────────────────────────────────────

/// Mints HONEY from USDC, pairs it with WETH in a Kodiak island and deposits
/// the island shares into the Beraborrow vault.
pub struct BeraborrowWethHoney;

struct WethHoneyInputs {
    weth: Address,
    usdc: Address,
    honey: Address,
    island: Address,
    primary: Address,
}

impl BeraborrowWethHoney {
    fn inputs(chain: Chain) -> Option<WethHoneyInputs> {
        let defi = defi_addresses(chain);
        let (island, primary) = match chain {
            Chain::Cartio => (
                address!("0xD4570a738675fB2c31e7b7b88998EE73E9E17d49"),
                address!("0xb9e24b49d1372DEb64b8039ab837074b703c8206"),
            ),
            Chain::Berachain => (
                address!("0xf6c6Be0FF6d6F70A04dBE4F1aDE62cB23053Bd95"),
                address!("0x9b6Cf6Ab16C409B3a2c796211c274c8a8da28D1d"),
            ),
        };
        Some(WethHoneyInputs {
            weth: defi.weth,
            usdc: defi.usdc,
            honey: defi.honey,
            island,
            primary,
        })
    }
}

impl Shortcut for BeraborrowWethHoney {
    fn name(&self) -> &'static str {
        "beraborrow-weth-honey"
    }

    fn supported_chains(&self) -> Vec<Chain> {
        chains_where(|c| Self::inputs(c).is_some())
    }

    fn setter_inputs(&self) -> &'static [SetterInput] {
        KODIAK_SETTERS
    }

    fn build(&self, chain: Chain) -> Result<Output> {
        let i = Self::inputs(chain).ok_or_else(|| unsupported(self.name(), chain))?;
        let mut b = RecipeBuilder::new(self.name(), chain, vec![i.weth, i.usdc], vec![i.primary]);

        let usdc_amount = b.balance_of(i.usdc)?;
        let weth_amount = b.balance_of(i.weth)?;
        let minted = b.mint_honey(i.usdc, usdc_amount)?;

        b.deposit_kodiak(
            i.island,
            [i.weth, i.honey],
            [weth_amount, minted],
            self.setter_inputs(),
        )?;

        let island_amount = b.balance_of(i.island)?;
        b.deposit_erc4626(i.island, i.primary, island_amount)?;

        let leftovers = b.balance_of(i.honey)?;
        b.redeem_honey(i.usdc, leftovers)?;

        b.build()
    }

    fn address_data(&self, chain: Chain) -> Result<Vec<(Address, AddressData)>> {
        let i = Self::inputs(chain).ok_or_else(|| unsupported(self.name(), chain))?;
        Ok(vec![
            (i.usdc, AddressData::new("ERC20:USDC")),
            (i.honey, AddressData::new("ERC20:HONEY")),
            (i.weth, AddressData::new("ERC20:WETH")),
            (i.island, AddressData::new("Kodiak Island-WETH-HONEY-0.3%")),
            (
                defi_addresses(chain).kodiak_router,
                AddressData::new("Kodiak Island Router"),
            ),
            (i.primary, AddressData::new("Beraborrow Vault")),
        ])
    }
}
