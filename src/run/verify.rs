use std::collections::BTreeMap;

use alloy::primitives::Address;
use anyhow::Result;

use crate::error::Error;
use crate::model::chain::Chain;
use crate::quoter::{ApiTransaction, QuoteRequest, QuoteResult, Quoter, quote_first};
use crate::shortcuts::Metadata;

/// Tokens to report after execution: declared outputs, then declared inputs
/// to catch leftover dust.
pub fn quote_tokens(metadata: &Metadata) -> Vec<Address> {
    metadata
        .tokens_out
        .iter()
        .chain(&metadata.tokens_in)
        .copied()
        .collect()
}

/// Split the quoted amounts into `(quote, dust)` maps.
///
/// Each token takes the amount at its first position in [`quote_tokens`].
pub fn split_amounts(
    metadata: &Metadata,
    quote: &QuoteResult,
) -> Result<(BTreeMap<Address, String>, BTreeMap<Address, String>), Error> {
    let tokens = quote_tokens(metadata);
    let amount_of = |token: &Address| -> Result<(Address, String), Error> {
        tokens
            .iter()
            .position(|t| t == token)
            .and_then(|i| quote.amount_out.get(i))
            .map(|amount| (*token, amount.clone()))
            .ok_or(Error::MissingQuoteAmount(*token))
    };

    let quoted = metadata
        .tokens_out
        .iter()
        .map(amount_of)
        .collect::<Result<_, _>>()?;
    let dust = metadata
        .tokens_in
        .iter()
        .map(amount_of)
        .collect::<Result<_, _>>()?;
    Ok((quoted, dust))
}

/// Result of simulating the assembled transaction.
#[derive(Debug, Clone)]
pub struct Verified {
    pub quote: BTreeMap<Address, String>,
    pub dust: BTreeMap<Address, String>,
    pub gas: String,
}

/// Simulate `tx` on the quoter and collect output and dust balances.
pub async fn verify_transaction<Q: Quoter + ?Sized>(
    quoter: &Q,
    chain: Chain,
    tx: ApiTransaction,
    metadata: &Metadata,
) -> Result<Verified> {
    let request = QuoteRequest {
        chain_id: chain.chain_id(),
        transactions: vec![tx],
        token_in: Vec::new(),
        token_out: quote_tokens(metadata),
        amount_in: Vec::new(),
    };
    let result = quote_first(quoter, &request).await?;
    let (quote, dust) = split_amounts(metadata, &result)?;
    Ok(Verified {
        quote,
        dust,
        gas: result.gas,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quoter::QuoteStatus;

    fn token(n: u8) -> Address {
        Address::repeat_byte(n)
    }

    fn quote(amounts: &[&str]) -> QuoteResult {
        QuoteResult {
            status: QuoteStatus::Success,
            amount_out: amounts.iter().map(|s| s.to_string()).collect(),
            gas: "100".into(),
            error: None,
        }
    }

    #[test]
    fn outputs_then_inputs() {
        let meta = Metadata {
            tokens_in: vec![token(1), token(2)],
            tokens_out: vec![token(3)],
        };
        assert_eq!(quote_tokens(&meta), vec![token(3), token(1), token(2)]);

        let (quoted, dust) = split_amounts(&meta, &quote(&["500", "1", "0"])).unwrap();
        assert_eq!(quoted[&token(3)], "500");
        assert_eq!(dust[&token(1)], "1");
        assert_eq!(dust[&token(2)], "0");
    }

    #[test]
    fn repeated_token_uses_first_position() {
        let meta = Metadata {
            tokens_in: vec![token(1)],
            tokens_out: vec![token(1)],
        };
        let (quoted, dust) = split_amounts(&meta, &quote(&["7", "9"])).unwrap();
        assert_eq!(quoted[&token(1)], "7");
        assert_eq!(dust[&token(1)], "7");
    }

    #[test]
    fn short_response_is_an_error() {
        let meta = Metadata {
            tokens_in: vec![token(1)],
            tokens_out: vec![token(2)],
        };
        assert!(matches!(
            split_amounts(&meta, &quote(&["7"])),
            Err(Error::MissingQuoteAmount(t)) if t == token(1)
        ));
    }
}
