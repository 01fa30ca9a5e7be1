use std::collections::BTreeMap;

use alloy::primitives::{Address, U256};
use serde::Serialize;

/// Outcome of a simulated or verified run, printed to the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub weiroll_wallet: Address,
    pub amounts_in: Vec<String>,
    pub min_amount_out: String,
    pub min_amount_out_hex: String,
    /// Simulated balance per declared output token.
    pub quote: BTreeMap<Address, String>,
    /// Leftover balance per declared input token.
    pub dust: BTreeMap<Address, String>,
    pub gas: String,
}

impl Report {
    pub fn new(
        wallet: Address,
        amounts_in: &[U256],
        min_amount_out: U256,
        quote: BTreeMap<Address, String>,
        dust: BTreeMap<Address, String>,
        gas: String,
    ) -> Self {
        Report {
            weiroll_wallet: wallet,
            amounts_in: amounts_in.iter().map(|a| a.to_string()).collect(),
            min_amount_out: min_amount_out.to_string(),
            min_amount_out_hex: format!("0x{min_amount_out:x}"),
            quote,
            dust,
            gas,
        }
    }
}
