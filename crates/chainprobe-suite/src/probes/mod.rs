//! The individual capability probes.
//!
//! Every probe takes the shared [`RpcSession`], issues its calls one after
//! another, and returns either a report or the [`ProbeError`] that stopped it.

pub mod balance;
pub mod block_activity;
pub mod chain_id;
pub mod fee_history;
pub mod gas_price;

use std::time::Duration;

use alloy_primitives::U256;
use chainprobe_core::units::{hex_or_number_to_u256, u256_to_u64, NumericError};
use chainprobe_core::{RpcResponse, RpcSession};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::ProbeError;

pub use balance::{AccountBalance, BalanceReport};
pub use block_activity::{BlockActivityReport, BlockSample};
pub use chain_id::ChainIdReport;
pub use fee_history::{FeeHistoryReport, FeeHistorySample, ParamEncoding};
pub use gas_price::GasPriceReport;

/// The five probes, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ProbeKind {
    ChainId,
    BlockActivity,
    Balance,
    FeeHistory,
    GasPrice,
}

impl ProbeKind {
    pub const ALL: [ProbeKind; 5] = [
        Self::ChainId,
        Self::BlockActivity,
        Self::Balance,
        Self::FeeHistory,
        Self::GasPrice,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::ChainId => "Chain ID",
            Self::BlockActivity => "Block Activity",
            Self::Balance => "Balance Queries",
            Self::FeeHistory => "Fee History (EIP-1559)",
            Self::GasPrice => "Gas Price",
        }
    }
}

impl std::fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What a passing probe found out.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "probe", rename_all = "snake_case")]
pub enum ProbeReport {
    ChainId(ChainIdReport),
    BlockActivity(BlockActivityReport),
    Balance(BalanceReport),
    FeeHistory(FeeHistoryReport),
    GasPrice(GasPriceReport),
}

/// Issue one call and pull out its `result`.
///
/// JSON-RPC errors become [`ProbeError::Rpc`]; an absent, `null` or empty
/// string result becomes [`ProbeError::MissingResult`].
pub(crate) async fn call_for_result(
    session: &RpcSession,
    method: &str,
    params: Vec<Value>,
) -> Result<(Value, RpcResponse), ProbeError> {
    let mut resp = session.request(method, params).await?;
    if let Some(err) = resp.body.error.take() {
        return Err(ProbeError::Rpc(err));
    }
    match resp.body.result.take() {
        None | Some(Value::Null) => Err(ProbeError::missing(method)),
        Some(Value::String(s)) if s.is_empty() => Err(ProbeError::missing(method)),
        Some(value) => Ok((value, resp)),
    }
}

/// Normalize a quantity, tagging failures with the field name.
pub(crate) fn quantity(value: &Value, field: &str) -> Result<U256, ProbeError> {
    hex_or_number_to_u256(value).map_err(|e| ProbeError::numeric(field, e))
}

/// Normalize a quantity that must fit in a `u64`.
pub(crate) fn small_quantity(value: &Value, field: &str) -> Result<u64, ProbeError> {
    let wide = quantity(value, field)?;
    u256_to_u64(wide).ok_or_else(|| {
        ProbeError::numeric(
            field,
            NumericError {
                value: value.to_string(),
                reason: "exceeds u64",
            },
        )
    })
}

pub(crate) fn serialize_ms<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64() * 1000.0)
}
