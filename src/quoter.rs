use std::str::FromStr;
use std::time::Duration;

use alloy::primitives::{Address, Bytes, U256};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const DEFAULT_QUOTER_URL: &str = "http://127.0.0.1:3000/api/quote";

// ── Request types ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum OperationType {
    Call,
    DelegateCall,
}

impl From<OperationType> for u8 {
    fn from(op: OperationType) -> u8 {
        match op {
            OperationType::Call => 0,
            OperationType::DelegateCall => 1,
        }
    }
}

impl TryFrom<u8> for OperationType {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(OperationType::Call),
            1 => Ok(OperationType::DelegateCall),
            other => Err(format!("unknown operation type {other}")),
        }
    }
}

/// A transaction submitted to the quoter for simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTransaction {
    pub from: Address,
    pub to: Address,
    pub data: Bytes,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executor: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_type: Option<OperationType>,
}

impl ApiTransaction {
    /// A plain zero-value call.
    pub fn call(from: Address, to: Address, data: Bytes) -> Self {
        ApiTransaction {
            from,
            to,
            data,
            value: "0".to_string(),
            receiver: None,
            executor: None,
            operation_type: None,
        }
    }
}

/// Transactions are simulated in order; `tokenIn`/`amountIn` fund the
/// simulation and `tokenOut` lists the balances to report afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub chain_id: u64,
    pub transactions: Vec<ApiTransaction>,
    pub token_in: Vec<Address>,
    pub token_out: Vec<Address>,
    pub amount_in: Vec<String>,
}

// ── Response types ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResult {
    pub status: QuoteStatus,
    #[serde(default)]
    pub amount_out: Vec<String>,
    #[serde(default)]
    pub gas: String,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

impl QuoteResult {
    /// Parse the amount at `index` of `amount_out`.
    pub fn amount(&self, index: usize) -> Option<U256> {
        self.amount_out
            .get(index)
            .and_then(|s| U256::from_str(s).ok())
    }

    fn error_message(&self) -> String {
        match &self.error {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "unknown error".to_string(),
        }
    }
}

// ── Quoter ─────────────────────────────────────────────────────────

#[async_trait]
pub trait Quoter: Send + Sync {
    /// Submit a simulation request; one result per simulated bundle.
    async fn simulate(&self, request: &QuoteRequest) -> Result<Vec<QuoteResult>>;
}

/// Submit `request` and return its first result, failing on an `Error` status.
pub async fn quote_first<Q: Quoter + ?Sized>(quoter: &Q, request: &QuoteRequest) -> Result<QuoteResult> {
    let result = quoter
        .simulate(request)
        .await?
        .into_iter()
        .next()
        .ok_or(Error::EmptyQuote)?;

    if result.status == QuoteStatus::Error {
        return Err(Error::QuoteFailed(result.error_message()).into());
    }
    Ok(result)
}

pub struct HttpQuoter {
    client: reqwest::Client,
    url: String,
}

impl HttpQuoter {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("yield-shortcuts/0.1")
            .build()
            .context("creating quoter HTTP client")?;

        Ok(HttpQuoter {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Quoter for HttpQuoter {
    async fn simulate(&self, request: &QuoteRequest) -> Result<Vec<QuoteResult>> {
        tracing::debug!(url = %self.url, txs = request.transactions.len(), "submitting quote");
        let resp = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .context("quoter request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("quoter returned {status}: {body}");
        }

        resp.json::<Vec<QuoteResult>>()
            .await
            .context("parsing quoter response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn request_serializes_in_camel_case() {
        let from = address!("0x00000000000000000000000000000000000000aa");
        let mut tx = ApiTransaction::call(from, from, Bytes::from(vec![0x12, 0x34]));
        tx.operation_type = Some(OperationType::DelegateCall);
        let request = QuoteRequest {
            chain_id: 80094,
            transactions: vec![tx],
            token_in: vec![],
            token_out: vec![from],
            amount_in: vec![],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["chainId"], 80094);
        assert_eq!(json["transactions"][0]["operationType"], 1);
        assert_eq!(json["transactions"][0]["data"], "0x1234");
        assert!(json["transactions"][0].get("receiver").is_none());
        assert!(json.get("tokenOut").is_some());
    }

    #[test]
    fn parses_error_result() {
        let raw = r#"[{"status":"Error","error":"execution reverted"}]"#;
        let results: Vec<QuoteResult> = serde_json::from_str(raw).unwrap();
        assert_eq!(results[0].status, QuoteStatus::Error);
        assert_eq!(results[0].error_message(), "execution reverted");
    }

    #[test]
    fn parses_amounts() {
        let raw = r#"{"status":"Success","amountOut":["150","16"],"gas":"21000"}"#;
        let result: QuoteResult = serde_json::from_str(raw).unwrap();
        assert_eq!(result.amount(0), Some(U256::from(150)));
        assert_eq!(result.amount(1), Some(U256::from(16)));
        assert_eq!(result.amount(2), None);
    }
}
