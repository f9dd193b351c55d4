//! `eth_chainId` probe.

use std::time::Duration;

use chainprobe_core::chains::chain_name_or_unknown;
use chainprobe_core::RpcSession;
use serde::Serialize;

use super::{call_for_result, serialize_ms, small_quantity};
use crate::error::ProbeError;

const METHOD: &str = "eth_chainId";

#[derive(Debug, Clone, Serialize)]
pub struct ChainIdReport {
    pub chain_id: u64,
    /// Network name, or "Unknown chain".
    pub network: String,
    pub expected: Option<i128>,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_ms")]
    pub elapsed: Duration,
}

impl ChainIdReport {
    /// `true` when an expected id was given and differs from the observed one.
    pub fn mismatch(&self) -> bool {
        self.expected
            .is_some_and(|expected| expected != i128::from(self.chain_id))
    }
}

pub async fn probe(
    session: &RpcSession,
    expected: Option<i128>,
) -> Result<ChainIdReport, ProbeError> {
    let (value, resp) = call_for_result(session, METHOD, vec![]).await?;
    let chain_id = small_quantity(&value, METHOD)?;

    let report = ChainIdReport {
        chain_id,
        network: chain_name_or_unknown(chain_id).to_string(),
        expected,
        elapsed: resp.elapsed,
    };

    if report.mismatch() {
        tracing::warn!(
            observed = chain_id,
            expected = ?expected,
            "chain id does not match the expected value"
        );
    }
    Ok(report)
}
