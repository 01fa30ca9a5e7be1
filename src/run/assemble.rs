use alloy::primitives::{Address, B256, Bytes, U256};
use alloy::sol_types::SolCall;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::onchain::abi::{IDepositExecutor, IMultiSend};
use crate::quoter::{ApiTransaction, OperationType};

/// A zero-value contract call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Call {
    pub target: Address,
    pub data: Bytes,
}

impl Call {
    pub fn new(target: Address, data: impl Into<Bytes>) -> Self {
        Call {
            target,
            data: data.into(),
        }
    }
}

/// `executeDepositRecipes(marketHash, [wallet])` on the deposit executor.
pub fn execute_deposit_call(deposit_executor: Address, market_hash: B256, wallet: Address) -> Call {
    let data = IDepositExecutor::executeDepositRecipesCall {
        _sourceMarketHash: market_hash,
        _weirollWallets: vec![wallet],
    }
    .abi_encode();
    Call::new(deposit_executor, data)
}

// ── MultiSend packing ──────────────────────────────────────────────

// operation(1) | to(20) | value(32) | dataLength(32)
const PACKED_HEADER_LEN: usize = 1 + 20 + 32 + 32;
const OPERATION_CALL: u8 = 0;

/// Encode `calls` as `multiSend(bytes)` calldata.
pub fn encode_multicall(calls: &[Call]) -> Bytes {
    let mut packed = Vec::with_capacity(
        calls
            .iter()
            .map(|c| PACKED_HEADER_LEN + c.data.len())
            .sum(),
    );
    for call in calls {
        packed.push(OPERATION_CALL);
        packed.extend_from_slice(call.target.as_slice());
        packed.extend_from_slice(&U256::ZERO.to_be_bytes::<32>());
        packed.extend_from_slice(&U256::from(call.data.len()).to_be_bytes::<32>());
        packed.extend_from_slice(&call.data);
    }

    IMultiSend::multiSendCall {
        transactions: packed.into(),
    }
    .abi_encode()
    .into()
}

/// Recover the ordered call list from `multiSend(bytes)` calldata.
pub fn decode_multicall(data: &[u8]) -> Result<Vec<Call>> {
    let decoded = IMultiSend::multiSendCall::abi_decode(data)
        .map_err(|e| Error::InvalidMulticall(e.to_string()))?;
    let packed = decoded.transactions;

    let mut calls = Vec::new();
    let mut rest: &[u8] = &packed;
    while !rest.is_empty() {
        if rest.len() < PACKED_HEADER_LEN {
            return Err(Error::InvalidMulticall(format!(
                "truncated header ({} bytes left)",
                rest.len()
            )));
        }
        let operation = rest[0];
        if operation != OPERATION_CALL {
            return Err(Error::InvalidMulticall(format!("unsupported operation {operation}")));
        }
        let target = Address::from_slice(&rest[1..21]);
        let len = U256::from_be_slice(&rest[53..85]);
        let len = usize::try_from(len)
            .ok()
            .filter(|l| *l <= rest.len() - PACKED_HEADER_LEN)
            .ok_or_else(|| Error::InvalidMulticall(format!("data length {len} out of bounds")))?;

        let body = &rest[PACKED_HEADER_LEN..];
        calls.push(Call::new(target, Bytes::copy_from_slice(&body[..len])));
        rest = &body[len..];
    }
    Ok(calls)
}

// ── Assembled transaction ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assembled {
    /// The only call, sent directly.
    Single(Call),
    /// Several calls batched through a delegate-call to the multicall contract.
    Multicall {
        multicall: Address,
        calls: Vec<Call>,
        data: Bytes,
    },
}

impl Assembled {
    pub fn new(mut calls: Vec<Call>, multicall: Address) -> Result<Self> {
        if calls.len() > 1 {
            return Ok(Assembled::Multicall {
                multicall,
                data: encode_multicall(&calls),
                calls,
            });
        }
        calls
            .pop()
            .map(Assembled::Single)
            .ok_or_else(|| Error::InvalidMulticall("no calls to assemble".to_string()))
    }

    pub fn is_multicall(&self) -> bool {
        matches!(self, Assembled::Multicall { .. })
    }

    pub fn calls(&self) -> &[Call] {
        match self {
            Assembled::Single(call) => std::slice::from_ref(call),
            Assembled::Multicall { calls, .. } => calls,
        }
    }

    /// The transaction the campaign owner submits, as sent to the quoter.
    pub fn to_api_transaction(&self, owner: Address, wallet: Address) -> ApiTransaction {
        let (to, data, operation_type) = match self {
            Assembled::Single(call) => (call.target, call.data.clone(), None),
            Assembled::Multicall { multicall, data, .. } => {
                (*multicall, data.clone(), Some(OperationType::DelegateCall))
            }
        };
        ApiTransaction {
            receiver: Some(wallet),
            executor: Some(wallet),
            operation_type,
            ..ApiTransaction::call(owner, to, data)
        }
    }
}
