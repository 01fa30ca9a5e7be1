use std::str::FromStr;

use alloy::primitives::{Address, B256};
use anyhow::{Result, bail};

use crate::model::chain::Chain;
use crate::run::matcher::verification_hash;
use crate::shortcuts::Catalog;

/// Verification hash of one shortcut's recipe on a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashRow {
    pub shortcut: &'static str,
    pub receipt_token: Address,
    pub verification_hash: B256,
}

/// Hashes for every shortcut supporting `chain`, or only for `only` when given.
pub fn hashes(catalog: &Catalog, chain: Chain, only: Option<&str>) -> Result<Vec<HashRow>> {
    if let Some(name) = only {
        match catalog.find(name) {
            None => bail!("Unknown shortcut '{name}'. Run `yield-shortcuts list` to see available shortcuts."),
            Some(s) if !s.supports(chain) => {
                bail!("Shortcut '{name}' does not support chain {chain}")
            }
            Some(_) => {}
        }
    }

    catalog
        .supporting(chain)
        .filter(|s| only.is_none_or(|name| s.name() == name))
        .map(|s| -> Result<HashRow> {
            let output = s.build(chain)?;
            Ok(HashRow {
                shortcut: s.name(),
                receipt_token: output.receipt_token(),
                verification_hash: verification_hash(output.receipt_token(), &output.script.to_recipe()),
            })
        })
        .collect()
}

/// Print the verification hash of each shortcut on `chain`.
pub fn run(chain: &str, shortcut: Option<&str>) -> Result<()> {
    let chain = Chain::from_str(chain)?;
    let rows = hashes(&Catalog::builtin(), chain, shortcut)?;

    println!("Verification hashes on {chain} ({})", chain.chain_id());
    for row in rows {
        println!("  {}", row.shortcut);
        println!("    receipt token:     {}", row.receipt_token);
        println!("    verification hash: {}", row.verification_hash);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_supporting_shortcut() {
        let catalog = Catalog::builtin();
        let rows = hashes(&catalog, Chain::Berachain, None).unwrap();
        assert_eq!(rows.len(), catalog.supporting(Chain::Berachain).count());
    }

    #[test]
    fn filters_by_name() {
        let catalog = Catalog::builtin();
        let rows = hashes(&catalog, Chain::Cartio, Some("dolomite-dylpumpbtc")).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].shortcut, "dolomite-dylpumpbtc");
    }

    #[test]
    fn rejects_unknown_or_unsupported() {
        let catalog = Catalog::builtin();
        assert!(hashes(&catalog, Chain::Cartio, Some("nope")).is_err());
        assert!(hashes(&catalog, Chain::Cartio, Some("kodiak-wbtc-stbtc")).is_err());
    }
}
