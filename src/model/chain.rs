use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A chain that hosts deposit campaigns.
///
/// Every per-chain table in the crate is an exhaustive `match` over this enum,
/// so adding a variant fails to compile until each table covers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Cartio,
    Berachain,
}

// ── Methods ──────────────────────────────────────────────────────────

impl Chain {
    pub const ALL: [Chain; 2] = [Chain::Cartio, Chain::Berachain];

    /// EVM chain ID.
    pub fn chain_id(self) -> u64 {
        match self {
            Chain::Cartio => 80000,
            Chain::Berachain => 80094,
        }
    }

    /// Public JSON-RPC endpoint used when no override is configured.
    pub fn default_rpc_url(self) -> &'static str {
        match self {
            Chain::Cartio => "https://rockbeard-eth-cartio.berachain.com",
            Chain::Berachain => "https://rpc.berachain.com",
        }
    }

    /// Human-readable name, as accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Chain::Cartio => "cartio",
            Chain::Berachain => "berachain",
        }
    }

    pub fn from_chain_id(chain_id: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.chain_id() == chain_id)
    }
}

impl FromStr for Chain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cartio" => Ok(Chain::Cartio),
            "berachain" | "bera" => Ok(Chain::Berachain),
            other => Err(Error::UnknownChain(other.to_string())),
        }
    }
}

// ── Display ──────────────────────────────────────────────────────────

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names_case_insensitively() {
        assert_eq!("Berachain".parse::<Chain>().unwrap(), Chain::Berachain);
        assert_eq!("cartio".parse::<Chain>().unwrap(), Chain::Cartio);
    }

    #[test]
    fn rejects_unknown_chain() {
        let err = "ethereum".parse::<Chain>().unwrap_err();
        assert!(matches!(err, Error::UnknownChain(ref name) if name == "ethereum"));
    }

    #[test]
    fn chain_id_round_trips() {
        for chain in Chain::ALL {
            assert_eq!(Chain::from_chain_id(chain.chain_id()), Some(chain));
        }
        assert_eq!(Chain::from_chain_id(1), None);
    }
}
