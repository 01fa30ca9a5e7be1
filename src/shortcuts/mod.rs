pub mod beraborrow;
pub mod builder;
pub mod dolomite;
pub mod kodiak;
pub mod satlayer;

use std::collections::HashMap;
use std::fmt;

use alloy::primitives::Address;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::chain::Chain;
use crate::onchain::addresses;
use crate::weiroll::Script;

pub use builder::RecipeBuilder;

// ── Setter inputs ──────────────────────────────────────────────────

/// A recipe parameter whose value is written to the setter contract right
/// before execution. The index is the setter slot the recipe reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SetterInput {
    MinAmountOut,
    MinAmount0Bps,
    MinAmount1Bps,
    SkewRatio,
}

impl SetterInput {
    pub const ALL: [SetterInput; 4] = [
        SetterInput::MinAmountOut,
        SetterInput::MinAmount0Bps,
        SetterInput::MinAmount1Bps,
        SetterInput::SkewRatio,
    ];

    pub fn index(self) -> u64 {
        match self {
            SetterInput::MinAmountOut => 0,
            SetterInput::MinAmount0Bps => 1,
            SetterInput::MinAmount1Bps => 2,
            SetterInput::SkewRatio => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SetterInput::MinAmountOut => "minAmountOut",
            SetterInput::MinAmount0Bps => "minAmount0Bps",
            SetterInput::MinAmount1Bps => "minAmount1Bps",
            SetterInput::SkewRatio => "skewRatio",
        }
    }
}

impl fmt::Display for SetterInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Build output ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub tokens_in: Vec<Address>,
    pub tokens_out: Vec<Address>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub script: Script,
    pub metadata: Metadata,
}

impl Output {
    /// The token a campaign receives for this recipe: the first declared output.
    pub fn receipt_token(&self) -> Address {
        self.metadata.tokens_out[0]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressData {
    pub label: String,
}

impl AddressData {
    pub fn new(label: impl Into<String>) -> Self {
        AddressData {
            label: label.into(),
        }
    }
}

// ── Shortcut trait ─────────────────────────────────────────────────

/// A prebuilt deposit recipe for one protocol integration.
pub trait Shortcut: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str {
        ""
    }

    fn supported_chains(&self) -> Vec<Chain>;

    /// Parameters the recipe reads from the setter contract.
    fn setter_inputs(&self) -> &'static [SetterInput];

    /// Compile the recipe for `chain`.
    fn build(&self, chain: Chain) -> Result<Output>;

    /// Human-readable labels for the addresses the recipe touches.
    fn address_data(&self, chain: Chain) -> Result<Vec<(Address, AddressData)>>;

    /// Token holders usable to fund simulations on `chain`.
    fn token_holders(&self, chain: Chain) -> HashMap<Address, Address> {
        addresses::token_holders(chain)
    }

    fn supports(&self, chain: Chain) -> bool {
        self.supported_chains().contains(&chain)
    }

    fn has_setter(&self, input: SetterInput) -> bool {
        self.setter_inputs().contains(&input)
    }
}

pub(crate) fn unsupported(shortcut: &str, chain: Chain) -> Error {
    Error::UnsupportedChain {
        shortcut: shortcut.to_string(),
        chain,
    }
}

/// Chains for which `has_inputs` holds, in `Chain::ALL` order.
pub(crate) fn chains_where(has_inputs: impl Fn(Chain) -> bool) -> Vec<Chain> {
    Chain::ALL.into_iter().filter(|c| has_inputs(*c)).collect()
}

// ── Catalog ────────────────────────────────────────────────────────

/// Static registry of shortcuts.
pub struct Catalog {
    shortcuts: Vec<Box<dyn Shortcut>>,
}

impl Catalog {
    pub fn new(shortcuts: Vec<Box<dyn Shortcut>>) -> Self {
        Catalog { shortcuts }
    }

    /// Every shortcut shipped with the crate.
    pub fn builtin() -> Self {
        Catalog::new(vec![
            Box::new(beraborrow::BeraborrowNectUsde),
            Box::new(beraborrow::BeraborrowWethHoney),
            Box::new(dolomite::DolomiteDylPumpBtc),
            Box::new(kodiak::KodiakWbtcStbtc),
            Box::new(satlayer::SatlayerPumpBtc),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Shortcut> {
        self.shortcuts.iter().map(|s| s.as_ref())
    }

    pub fn supporting(&self, chain: Chain) -> impl Iterator<Item = &dyn Shortcut> {
        self.iter().filter(move |s| s.supports(chain))
    }

    pub fn find(&self, name: &str) -> Option<&dyn Shortcut> {
        self.iter().find(|s| s.name() == name)
    }

    pub fn len(&self) -> usize {
        self.shortcuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shortcuts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run::matcher::verification_hash;

    #[test]
    fn setter_indices_are_unique() {
        let mut indices: Vec<u64> = SetterInput::ALL.iter().map(|s| s.index()).collect();
        indices.dedup();
        assert_eq!(indices.len(), SetterInput::ALL.len());
    }

    #[test]
    fn every_builtin_shortcut_builds_on_its_chains() {
        let catalog = Catalog::builtin();
        for shortcut in catalog.iter() {
            assert!(!shortcut.supported_chains().is_empty(), "{}", shortcut.name());
            for chain in shortcut.supported_chains() {
                let output = shortcut.build(chain).unwrap();
                assert!(!output.metadata.tokens_in.is_empty(), "{}", shortcut.name());
                assert!(!output.metadata.tokens_out.is_empty(), "{}", shortcut.name());
                assert!(!output.script.commands.is_empty());

                let again = shortcut.build(chain).unwrap();
                let recipe = output.script.to_recipe();
                assert_eq!(
                    verification_hash(output.receipt_token(), &recipe),
                    verification_hash(again.receipt_token(), &again.script.to_recipe()),
                );
                assert!(!shortcut.address_data(chain).unwrap().is_empty());
            }
        }
    }

    #[test]
    fn builtin_hashes_are_distinct_per_chain() {
        let catalog = Catalog::builtin();
        for chain in Chain::ALL {
            let mut hashes: Vec<_> = catalog
                .supporting(chain)
                .map(|s| {
                    let out = s.build(chain).unwrap();
                    verification_hash(out.receipt_token(), &out.script.to_recipe())
                })
                .collect();
            let total = hashes.len();
            hashes.sort();
            hashes.dedup();
            assert_eq!(hashes.len(), total);
        }
    }

    #[test]
    fn unsupported_chain_is_reported() {
        let kodiak = kodiak::KodiakWbtcStbtc;
        assert!(!kodiak.supports(Chain::Cartio));
        assert!(matches!(
            kodiak.build(Chain::Cartio),
            Err(Error::UnsupportedChain { .. })
        ));
    }

    #[test]
    fn find_by_name() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 5);
        assert!(catalog.find("satlayer-pumpbtc").is_some());
        assert!(catalog.find("unknown").is_none());
    }
}
