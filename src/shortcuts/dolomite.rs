use alloy::primitives::{Address, address};

use crate::error::Result;
use crate::model::chain::Chain;

use super::{AddressData, Output, RecipeBuilder, SetterInput, Shortcut, chains_where, unsupported};

/// Wraps yl-pumpBTC into the Dolomite dyl-pumpBTC ERC-4626 vault.
pub struct DolomiteDylPumpBtc;

struct Inputs {
    ylpumpbtc: Address,
    vault: Address,
}

impl DolomiteDylPumpBtc {
    fn inputs(chain: Chain) -> Option<Inputs> {
        let vault = address!("0xC6AdB1e9cb781b9573B2cB83809E318D9619BC74");
        let ylpumpbtc = match chain {
            Chain::Cartio => address!("0x4Ebd8983Ca3b7c3621cdB9AD87191f2cB5677726"),
            Chain::Berachain => address!("0xdCB3D91555385DaE23e6B966b5626aa7A75Be940"),
        };
        Some(Inputs { ylpumpbtc, vault })
    }
}

impl Shortcut for DolomiteDylPumpBtc {
    fn name(&self) -> &'static str {
        "dolomite-dylpumpbtc"
    }

    fn supported_chains(&self) -> Vec<Chain> {
        chains_where(|c| Self::inputs(c).is_some())
    }

    fn setter_inputs(&self) -> &'static [SetterInput] {
        &[SetterInput::MinAmountOut]
    }

    fn build(&self, chain: Chain) -> Result<Output> {
        let i = Self::inputs(chain).ok_or_else(|| unsupported(self.name(), chain))?;
        let mut b = RecipeBuilder::new(self.name(), chain, vec![i.ylpumpbtc], vec![i.vault]);

        let amount = b.balance_of(i.ylpumpbtc)?;
        let shares = b.deposit_erc4626(i.ylpumpbtc, i.vault, amount)?;
        b.ensure_min_amount_out(shares)?;

        b.build()
    }

    fn address_data(&self, chain: Chain) -> Result<Vec<(Address, AddressData)>> {
        let i = Self::inputs(chain).ok_or_else(|| unsupported(self.name(), chain))?;
        Ok(vec![
            (i.ylpumpbtc, AddressData::new("ERC20:yl-pumpBTC")),
            (i.vault, AddressData::new("ERC20:dyl-pumpBTC")),
        ])
    }
}
