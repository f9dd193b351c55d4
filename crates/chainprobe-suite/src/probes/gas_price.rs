//! `eth_gasPrice` probe.

use alloy_primitives::U256;
use chainprobe_core::units::wei_to_gwei;
use chainprobe_core::RpcSession;
use serde::Serialize;

use super::{call_for_result, quantity};
use crate::error::ProbeError;

const METHOD: &str = "eth_gasPrice";

#[derive(Debug, Clone, Serialize)]
pub struct GasPriceReport {
    pub wei: U256,
    /// Gwei, 2 decimal places.
    pub gwei: String,
}

pub async fn probe(session: &RpcSession) -> Result<GasPriceReport, ProbeError> {
    let (value, _) = call_for_result(session, METHOD, vec![]).await?;
    let wei = quantity(&value, METHOD)?;
    Ok(GasPriceReport {
        wei,
        gwei: wei_to_gwei(wei),
    })
}
