//! `eth_blockNumber` sampling: latency statistics and chain liveness.

use std::time::Duration;

use chainprobe_core::{HttpVersion, RpcSession};
use serde::Serialize;

use super::{call_for_result, serialize_ms, small_quantity};
use crate::error::ProbeError;

const METHOD: &str = "eth_blockNumber";

/// One `eth_blockNumber` call.
#[derive(Debug, Clone, Serialize)]
pub struct BlockSample {
    pub block: u64,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_ms")]
    pub elapsed: Duration,
    pub protocol: HttpVersion,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlockActivityReport {
    pub samples: Vec<BlockSample>,
    #[serde(rename = "avg_elapsed_ms", serialize_with = "serialize_ms")]
    pub avg_elapsed: Duration,
    #[serde(rename = "min_elapsed_ms", serialize_with = "serialize_ms")]
    pub min_elapsed: Duration,
    #[serde(rename = "max_elapsed_ms", serialize_with = "serialize_ms")]
    pub max_elapsed: Duration,
    /// At least one call went over HTTP/2 or newer.
    pub http2: bool,
    /// Some later sample saw a higher block than an earlier one.
    pub live: bool,
    /// Highest block number observed.
    pub latest_block: u64,
}

impl BlockActivityReport {
    pub fn from_samples(samples: Vec<BlockSample>) -> Self {
        let elapsed: Vec<Duration> = samples.iter().map(|s| s.elapsed).collect();
        let blocks: Vec<u64> = samples.iter().map(|s| s.block).collect();
        let avg_elapsed = match u32::try_from(elapsed.len()) {
            Ok(n) if n > 0 => elapsed.iter().sum::<Duration>() / n,
            _ => Duration::ZERO,
        };

        Self {
            avg_elapsed,
            min_elapsed: elapsed.iter().copied().min().unwrap_or_default(),
            max_elapsed: elapsed.iter().copied().max().unwrap_or_default(),
            http2: samples.iter().any(|s| s.protocol.is_http2_or_newer()),
            live: is_live(&blocks),
            latest_block: blocks.iter().copied().max().unwrap_or_default(),
            samples,
        }
    }
}

/// `true` if any block number strictly exceeds one seen before it.
///
/// The sequence need not be monotonic: load-balanced endpoints can hop
/// between nodes that lag each other.
pub fn is_live(blocks: &[u64]) -> bool {
    let mut lowest = u64::MAX;
    for &block in blocks {
        if block > lowest {
            return true;
        }
        lowest = lowest.min(block);
    }
    false
}

pub async fn probe(session: &RpcSession, sample_count: usize) -> Result<BlockActivityReport, ProbeError> {
    let sample_count = sample_count.max(1);
    let mut samples = Vec::with_capacity(sample_count);

    for attempt in 1..=sample_count {
        let (value, resp) = call_for_result(session, METHOD, vec![]).await?;
        let block = small_quantity(&value, METHOD)?;
        tracing::debug!(
            attempt,
            block,
            elapsed_ms = resp.elapsed.as_millis() as u64,
            protocol = %resp.protocol,
            "block number sample"
        );
        samples.push(BlockSample {
            block,
            elapsed: resp.elapsed,
            protocol: resp.protocol,
        });
    }

    let report = BlockActivityReport::from_samples(samples);
    if !report.live {
        tracing::warn!(block = report.latest_block, "no new block observed across samples");
    }
    Ok(report)
}
