use alloy::primitives::{Address, B256};
use alloy::providers::Provider;
use alloy::rpc::types::{Filter, Log};
use anyhow::{Context, Result};
use futures::{StreamExt, TryStreamExt, stream};
use itertools::Itertools;

/// Maximum block span accepted by public RPC endpoints for `eth_getLogs`.
pub const LOG_WINDOW: u64 = 10_000;

/// Number of log windows requested at once.
pub const LOG_SCAN_CONCURRENCY: usize = 8;

/// Split `[from, to]` into inclusive windows of at most `span` blocks.
pub fn block_windows(from: u64, to: u64, span: u64) -> Vec<(u64, u64)> {
    let mut windows = Vec::new();
    let mut start = from;
    while start <= to {
        let end = start.saturating_add(span - 1).min(to);
        windows.push((start, end));
        if end == u64::MAX {
            break;
        }
        start = end + 1;
    }
    windows
}

/// Fetch all logs of `event` emitted by `emitter` with `topic1 == market_hash`,
/// from `from_block` to the current head. Windows are fetched concurrently and
/// returned in block order.
pub async fn scan_market_logs<P: Provider>(
    provider: &P,
    emitter: Address,
    event: B256,
    market_hash: B256,
    from_block: u64,
) -> Result<Vec<Log>> {
    let latest = provider
        .get_block_number()
        .await
        .context("fetching latest block number")?;

    let base = Filter::new()
        .address(emitter)
        .event_signature(event)
        .topic1(market_hash);

    let batches: Vec<Vec<Log>> = stream::iter(block_windows(from_block, latest, LOG_WINDOW))
        .map(|(start, end)| {
            let filter = base.clone().from_block(start).to_block(end);
            async move {
                provider
                    .get_logs(&filter)
                    .await
                    .with_context(|| format!("eth_getLogs for blocks {start}..={end}"))
            }
        })
        .buffered(LOG_SCAN_CONCURRENCY)
        .try_collect()
        .await?;

    Ok(batches.into_iter().flatten().collect())
}

/// Keep the first occurrence of every address, preserving order.
pub fn unique_in_order(addresses: impl IntoIterator<Item = Address>) -> Vec<Address> {
    addresses.into_iter().unique().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn windows_cover_range_without_gaps() {
        let windows = block_windows(148_757, 175_000, LOG_WINDOW);
        assert_eq!(windows.first().unwrap().0, 148_757);
        assert_eq!(windows.last().unwrap().1, 175_000);
        for pair in windows.windows(2) {
            assert_eq!(pair[0].1 + 1, pair[1].0);
        }
        assert!(windows.iter().all(|(a, b)| b - a < LOG_WINDOW));
    }

    #[test]
    fn single_block_range_yields_one_window() {
        assert_eq!(block_windows(10, 10, LOG_WINDOW), vec![(10, 10)]);
        assert!(block_windows(11, 10, LOG_WINDOW).is_empty());
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let a = address!("0x00000000000000000000000000000000000000aa");
        let b = address!("0x00000000000000000000000000000000000000bb");
        assert_eq!(unique_in_order([b, a, b, a]), vec![b, a]);
    }
}
