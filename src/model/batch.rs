use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use alloy::primitives::{Address, B256};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::chain::Chain;

pub const BATCH_VERSION: &str = "1.0";
pub const TX_BUILDER_VERSION: &str = "1.17.1";

// ── Safe Transaction Builder batch file ────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeBatchFile {
    pub version: String,
    pub chain_id: String,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
    pub meta: BatchMeta,
    pub transactions: Vec<SafeTransaction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchMeta {
    pub name: String,
    pub description: String,
    pub tx_builder_version: String,
    pub created_from_safe_address: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeTransaction {
    pub to: Address,
    pub value: String,
    /// Always null: the builder re-encodes from `contractMethod`.
    pub data: Option<String>,
    pub contract_method: ContractMethod,
    pub contract_inputs_values: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractMethod {
    pub inputs: Vec<MethodInput>,
    pub name: String,
    pub payable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodInput {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub internal_type: String,
}

impl MethodInput {
    pub fn new(name: &str, ty: &str) -> Self {
        MethodInput {
            name: name.to_string(),
            ty: ty.to_string(),
            internal_type: ty.to_string(),
        }
    }
}

impl SafeTransaction {
    /// A non-payable, zero-value method call described by name and typed inputs.
    pub fn method(to: Address, name: &str, inputs: &[(&str, &str, String)]) -> Self {
        SafeTransaction {
            to,
            value: "0".to_string(),
            data: None,
            contract_method: ContractMethod {
                inputs: inputs
                    .iter()
                    .map(|(name, ty, _)| MethodInput::new(name, ty))
                    .collect(),
                name: name.to_string(),
                payable: false,
            },
            contract_inputs_values: inputs
                .iter()
                .map(|(name, _, value)| (name.to_string(), value.clone()))
                .collect(),
        }
    }

    /// `executeDepositRecipes(bytes32 _sourceMarketHash, address[] _weirollWallets)`.
    pub fn execute_deposit_recipes(deposit_executor: Address, market_hash: B256, wallets: &[Address]) -> Self {
        let wallets = wallets
            .iter()
            .map(|w| w.to_string())
            .collect::<Vec<_>>()
            .join(",");
        SafeTransaction::method(
            deposit_executor,
            "executeDepositRecipes",
            &[
                ("_sourceMarketHash", "bytes32", market_hash.to_string()),
                ("_weirollWallets", "address[]", format!("[{wallets}]")),
            ],
        )
    }
}

pub fn create_batch_file(chain: Chain, safe: Address, transactions: Vec<SafeTransaction>) -> SafeBatchFile {
    SafeBatchFile {
        version: BATCH_VERSION.to_string(),
        chain_id: chain.chain_id().to_string(),
        created_at: chrono::Utc::now().timestamp_millis(),
        meta: BatchMeta {
            name: "Transactions Batch".to_string(),
            description: String::new(),
            tx_builder_version: TX_BUILDER_VERSION.to_string(),
            created_from_safe_address: safe,
        },
        transactions,
    }
}

pub fn batch_file_path(dir: &Path, market_hash: B256) -> PathBuf {
    dir.join(format!("tx-builder-{market_hash}.json"))
}

/// Write `batch` as pretty JSON to `<dir>/tx-builder-<marketHash>.json`.
pub fn write_batch_file(dir: &Path, market_hash: B256, batch: &SafeBatchFile) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = batch_file_path(dir, market_hash);
    let json = serde_json::to_string_pretty(batch).context("serializing batch file")?;
    std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}
