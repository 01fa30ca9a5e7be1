use alloy::primitives::{Address, address};

use crate::error::Result;
use crate::model::chain::Chain;
use crate::onchain::addresses::defi_addresses;

use super::{AddressData, Output, RecipeBuilder, SetterInput, Shortcut, chains_where, unsupported};

/// Restakes pumpBTC into the SatLayer pool for satpumpBTC.
pub struct SatlayerPumpBtc;

struct Inputs {
    pumpbtc: Address,
    receipt_token: Address,
    vault: Address,
}

impl SatlayerPumpBtc {
    fn inputs(chain: Chain) -> Option<Inputs> {
        let defi = defi_addresses(chain);
        let receipt_token = match chain {
            Chain::Cartio => address!("0x3C2E1C3b0A3fB1EfC8a43D08C9F2E6A0c3cB3F6d"),
            Chain::Berachain => address!("0xAD9f7d8a79Ab96C10Ed94d49463c2FF0F5Ca4eC8"),
        };
        Some(Inputs {
            pumpbtc: defi.pumpbtc,
            receipt_token,
            vault: defi.satlayer_vault,
        })
    }
}

impl Shortcut for SatlayerPumpBtc {
    fn name(&self) -> &'static str {
        "satlayer-pumpbtc"
    }

    fn supported_chains(&self) -> Vec<Chain> {
        chains_where(|c| Self::inputs(c).is_some())
    }

    fn setter_inputs(&self) -> &'static [SetterInput] {
        &[SetterInput::MinAmountOut]
    }

    fn build(&self, chain: Chain) -> Result<Output> {
        let i = Self::inputs(chain).ok_or_else(|| unsupported(self.name(), chain))?;
        let mut b =
            RecipeBuilder::new(self.name(), chain, vec![i.pumpbtc], vec![i.receipt_token]);

        let amount = b.balance_of(i.pumpbtc)?;
        let received = b.deposit_satlayer(i.pumpbtc, i.receipt_token, i.vault, amount)?;
        b.ensure_min_amount_out(received)?;

        b.build()
    }

    fn address_data(&self, chain: Chain) -> Result<Vec<(Address, AddressData)>> {
        let i = Self::inputs(chain).ok_or_else(|| unsupported(self.name(), chain))?;
        Ok(vec![
            (i.vault, AddressData::new("SatlayerPool")),
            (i.pumpbtc, AddressData::new("ERC20:pumpBTC.bera")),
            (i.receipt_token, AddressData::new("ERC20:satpumpBTC.bera")),
        ])
    }
}
