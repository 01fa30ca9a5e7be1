use alloy::primitives::{Address, address};

use crate::error::Result;
use crate::model::chain::Chain;
use crate::onchain::addresses::defi_addresses;

use super::{AddressData, Output, RecipeBuilder, SetterInput, Shortcut, chains_where, unsupported};

/// Pairs WBTC with stBTC in a Kodiak island. Berachain only.
pub struct KodiakWbtcStbtc;

struct Inputs {
    wbtc: Address,
    stbtc: Address,
    island: Address,
}

impl KodiakWbtcStbtc {
    fn inputs(chain: Chain) -> Option<Inputs> {
        let defi = defi_addresses(chain);
        match chain {
            Chain::Cartio => None,
            Chain::Berachain => Some(Inputs {
                wbtc: defi.wbtc,
                stbtc: defi.stbtc,
                island: address!("0x7428f72B70226b6C98DDBe14f80Ea23336528B1a"),
            }),
        }
    }
}

impl Shortcut for KodiakWbtcStbtc {
    fn name(&self) -> &'static str {
        "kodiak-wbtc-stbtc"
    }

    fn supported_chains(&self) -> Vec<Chain> {
        chains_where(|c| Self::inputs(c).is_some())
    }

    fn setter_inputs(&self) -> &'static [SetterInput] {
        &[
            SetterInput::MinAmountOut,
            SetterInput::MinAmount0Bps,
            SetterInput::MinAmount1Bps,
        ]
    }

    fn build(&self, chain: Chain) -> Result<Output> {
        let i = Self::inputs(chain).ok_or_else(|| unsupported(self.name(), chain))?;
        let mut b = RecipeBuilder::new(self.name(), chain, vec![i.wbtc, i.stbtc], vec![i.island]);

        let wbtc_amount = b.balance_of(i.wbtc)?;
        let stbtc_amount = b.balance_of(i.stbtc)?;
        b.deposit_kodiak(
            i.island,
            [i.wbtc, i.stbtc],
            [wbtc_amount, stbtc_amount],
            self.setter_inputs(),
        )?;

        b.build()
    }

    fn address_data(&self, chain: Chain) -> Result<Vec<(Address, AddressData)>> {
        let i = Self::inputs(chain).ok_or_else(|| unsupported(self.name(), chain))?;
        Ok(vec![
            (i.wbtc, AddressData::new("ERC20:wbtc")),
            (i.stbtc, AddressData::new("ERC20:stbtc")),
            (i.island, AddressData::new("Kodiak Island-wbtc-stbtc")),
            (
                defi_addresses(chain).kodiak_router,
                AddressData::new("Kodiak Island Router"),
            ),
        ])
    }
}
