use std::collections::HashMap;

use alloy::primitives::{Address, B256, keccak256};
use alloy::sol_types::SolValue;

use crate::error::{Error, Result};
use crate::model::chain::Chain;
use crate::onchain::abi::Recipe;
use crate::shortcuts::{Catalog, Output, Shortcut};

/// `keccak256(abi.encode(receiptToken, recipe))`, as computed by the deposit executor.
pub fn verification_hash(receipt_token: Address, recipe: &Recipe) -> B256 {
    keccak256((receipt_token, recipe.clone()).abi_encode_params())
}

// ── Shortcut index ─────────────────────────────────────────────────

/// A shortcut together with its compiled recipe for one chain.
pub struct Matched<'a> {
    pub shortcut: &'a dyn Shortcut,
    pub output: Output,
}

/// Verification hash → shortcut table for a single chain. Every supporting
/// shortcut is built exactly once when the index is created.
pub struct ShortcutIndex<'a> {
    chain: Chain,
    entries: HashMap<B256, Matched<'a>>,
}

impl<'a> ShortcutIndex<'a> {
    pub fn build(catalog: &'a Catalog, chain: Chain) -> Result<Self> {
        let mut entries = HashMap::new();
        for shortcut in catalog.supporting(chain) {
            let output = shortcut.build(chain)?;
            let hash = verification_hash(output.receipt_token(), &output.script.to_recipe());
            if let Some(previous) = entries.insert(hash, Matched { shortcut, output }) {
                tracing::warn!(
                    %hash,
                    replaced = previous.shortcut.name(),
                    by = shortcut.name(),
                    "duplicate verification hash in catalog"
                );
            }
        }
        tracing::debug!(%chain, shortcuts = entries.len(), "built shortcut index");
        Ok(ShortcutIndex { chain, entries })
    }

    pub fn chain(&self) -> Chain {
        self.chain
    }

    pub fn get(&self, hash: &B256) -> Option<&Matched<'a>> {
        self.entries.get(hash)
    }

    /// Resolve the shortcut whose recipe the campaign stores.
    pub fn lookup(&self, receipt_token: Address, recipe: &Recipe) -> Result<(B256, &Matched<'a>)> {
        let hash = verification_hash(receipt_token, recipe);
        self.get(&hash)
            .map(|m| (hash, m))
            .ok_or(Error::ShortcutNotFound(hash))
    }

    /// Entries sorted by shortcut name.
    pub fn entries(&self) -> Vec<(B256, &Matched<'a>)> {
        let mut all: Vec<_> = self.entries.iter().map(|(h, m)| (*h, m)).collect();
        all.sort_by_key(|(_, m)| m.shortcut.name());
        all
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── On-chain hash check ────────────────────────────────────────────

/// How a disagreement with the executor's stored hash is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerificationPolicy {
    /// Warn and continue.
    #[default]
    Lenient,
    /// Abort the run.
    Strict,
}

pub fn check_onchain_hash(computed: B256, onchain: B256, policy: VerificationPolicy) -> Result<()> {
    if computed == onchain {
        return Ok(());
    }
    match policy {
        VerificationPolicy::Lenient => {
            tracing::warn!(
                %computed,
                %onchain,
                "on-chain verification hash does not match calculated hash"
            );
            Ok(())
        }
        VerificationPolicy::Strict => Err(Error::VerificationHashMismatch { computed, onchain }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Bytes, address, b256};

    fn recipe() -> Recipe {
        Recipe {
            commands: vec![b256!(
                "0x70a0823102ffffffffffff001111111111111111111111111111111111111111"
            )],
            state: vec![Bytes::from(vec![0u8; 32])],
        }
    }

    #[test]
    fn hash_depends_on_receipt_token_and_recipe() {
        let a = address!("0x00000000000000000000000000000000000000aa");
        let b = address!("0x00000000000000000000000000000000000000bb");
        let h = verification_hash(a, &recipe());
        assert_eq!(h, verification_hash(a, &recipe()));
        assert_ne!(h, verification_hash(b, &recipe()));

        let mut other = recipe();
        other.state.push(Bytes::new());
        assert_ne!(h, verification_hash(a, &other));
    }

    #[test]
    fn index_finds_every_builtin_shortcut() {
        let catalog = Catalog::builtin();
        for chain in Chain::ALL {
            let index = ShortcutIndex::build(&catalog, chain).unwrap();
            assert_eq!(index.len(), catalog.supporting(chain).count());
            for shortcut in catalog.supporting(chain) {
                let out = shortcut.build(chain).unwrap();
                let (_, matched) = index
                    .lookup(out.receipt_token(), &out.script.to_recipe())
                    .unwrap();
                assert_eq!(matched.shortcut.name(), shortcut.name());
            }
        }
    }

    #[test]
    fn unknown_recipe_is_not_found() {
        let catalog = Catalog::builtin();
        let index = ShortcutIndex::build(&catalog, Chain::Berachain).unwrap();
        let token = address!("0x00000000000000000000000000000000000000aa");
        assert!(matches!(
            index.lookup(token, &recipe()),
            Err(Error::ShortcutNotFound(_))
        ));
    }

    #[test]
    fn mismatch_policy() {
        let a = B256::repeat_byte(1);
        let b = B256::repeat_byte(2);
        assert!(check_onchain_hash(a, a, VerificationPolicy::Strict).is_ok());
        assert!(check_onchain_hash(a, b, VerificationPolicy::Lenient).is_ok());
        assert!(matches!(
            check_onchain_hash(a, b, VerificationPolicy::Strict),
            Err(Error::VerificationHashMismatch { .. })
        ));
    }
}
