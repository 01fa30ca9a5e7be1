use alloy::primitives::{Address, B256};
use thiserror::Error;

use crate::model::chain::Chain;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unknown chain `{0}` (expected one of: cartio, berachain)")]
    UnknownChain(String),

    #[error("Invalid market hash `{0}`: expected 0x-prefixed 32-byte hex")]
    InvalidMarketHash(String),

    #[error("Shortcut `{shortcut}` does not support chain {chain}")]
    UnsupportedChain { shortcut: String, chain: Chain },

    #[error("Cannot find shortcut using market hash (verification hash {0})")]
    ShortcutNotFound(B256),

    #[error("On-chain verification hash ({onchain}) does not match calculated hash ({computed})")]
    VerificationHashMismatch { computed: B256, onchain: B256 },

    #[error("No assets have been bridged for market {0}")]
    NoWallets(B256),

    #[error("Shortcut `{0}` declares no input or output tokens")]
    EmptyShortcutTokens(String),

    #[error("Quote error: {0}")]
    QuoteFailed(String),

    #[error("Quoter returned no results")]
    EmptyQuote,

    #[error("Quote is missing an amount for token {0}")]
    MissingQuoteAmount(Address),

    #[error("Weiroll script exceeds {0} state slots")]
    ScriptTooLarge(usize),

    #[error("Call has {0} inputs, more than a weiroll command can address")]
    TooManyInputs(usize),

    #[error("Invalid multicall payload: {0}")]
    InvalidMulticall(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
