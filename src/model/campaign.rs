use alloy::primitives::{Address, U256};

use crate::onchain::abi::Recipe;

/// A deposit campaign as stored by the deposit executor for one market.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Campaign {
    /// Account allowed to execute the campaign (usually a Safe).
    pub owner: Address,
    pub verified: bool,
    pub num_input_tokens: u8,
    pub receipt_token: Address,
    pub unlock_timestamp: U256,
    pub deposit_recipe: Recipe,
}
