//! `eth_feeHistory` probe and EIP-1559 detection.
//!
//! Two stages:
//!
//! ```text
//! Stage 1: eth_feeHistory("0xa", "latest", [25, 50, 75])
//!     │ error ──► classify ──► UnsupportedFeature ──► pass, legacy node
//!     │                   ├──► NeedsFallback ─────► Stage 2
//!     │                   └──► Unknown ───────────► fail
//! Stage 2: eth_feeHistory(10, "latest", [25, 50, 75])
//!     │ error ──► classify ──► UnsupportedFeature ──► pass, legacy node
//!     │                   └──► anything else ─────► fail
//!     ▼
//! parse FeeHistorySample ──► baseFeePerGas empty? legacy : EIP-1559
//! ```

use alloy_primitives::U256;
use chainprobe_core::request::JsonRpcError;
use chainprobe_core::units::wei_to_gwei;
use chainprobe_core::RpcSession;
use serde::Serialize;
use serde_json::{Map, Value};

use super::{call_for_result, quantity};
use crate::classify::{classify_fee_history_error, FeeErrorClass};
use crate::error::ProbeError;

const METHOD: &str = "eth_feeHistory";

/// Blocks requested per call.
pub const FEE_HISTORY_BLOCK_COUNT: u64 = 10;

/// How the `blockCount` parameter was put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamEncoding {
    /// `"0xa"`
    Hex,
    /// `10`
    Number,
}

impl ParamEncoding {
    pub fn block_count(self, count: u64) -> Value {
        match self {
            Self::Hex => Value::String(format!("{count:#x}")),
            Self::Number => Value::from(count),
        }
    }
}

impl std::fmt::Display for ParamEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hex => write!(f, "hex"),
            Self::Number => write!(f, "number"),
        }
    }
}

/// A normalized `eth_feeHistory` result.
///
/// Every quantity is parsed independently, so arrays mixing hex strings
/// and numbers are fine.
#[derive(Debug, Clone, PartialEq)]
pub struct FeeHistorySample {
    pub base_fee_per_gas: Vec<U256>,
    pub gas_used_ratio: Vec<f64>,
    /// One row per block, one entry per requested percentile.
    pub reward: Option<Vec<Vec<U256>>>,
    pub oldest_block: Option<U256>,
}

impl FeeHistorySample {
    pub fn from_value(value: &Value) -> Result<Self, ProbeError> {
        let obj = value.as_object().ok_or_else(|| ProbeError::UnexpectedShape {
            field: METHOD.to_string(),
            expected: "object",
        })?;

        let base_fee_per_gas = match array_field(obj, "baseFeePerGas")? {
            Some(items) => quantities(items, "baseFeePerGas")?,
            None => Vec::new(),
        };

        let gas_used_ratio = match array_field(obj, "gasUsedRatio")? {
            Some(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    v.as_f64().ok_or_else(|| ProbeError::UnexpectedShape {
                        field: format!("gasUsedRatio[{i}]"),
                        expected: "number",
                    })
                })
                .collect::<Result<_, _>>()?,
            None => Vec::new(),
        };

        let reward = match array_field(obj, "reward")? {
            Some(rows) => Some(
                rows.iter()
                    .enumerate()
                    .map(|(i, row)| {
                        let field = format!("reward[{i}]");
                        let items = row.as_array().ok_or_else(|| ProbeError::UnexpectedShape {
                            field: field.clone(),
                            expected: "array",
                        })?;
                        quantities(items, &field)
                    })
                    .collect::<Result<_, _>>()?,
            ),
            None => None,
        };

        let oldest_block = match obj.get("oldestBlock") {
            None | Some(Value::Null) => None,
            Some(v) => Some(quantity(v, "oldestBlock")?),
        };

        Ok(Self {
            base_fee_per_gas,
            gas_used_ratio,
            reward,
            oldest_block,
        })
    }
}

fn array_field<'a>(obj: &'a Map<String, Value>, field: &str) -> Result<Option<&'a Vec<Value>>, ProbeError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items)),
        Some(_) => Err(ProbeError::UnexpectedShape {
            field: field.to_string(),
            expected: "array",
        }),
    }
}

fn quantities(items: &[Value], field: &str) -> Result<Vec<U256>, ProbeError> {
    items
        .iter()
        .enumerate()
        .map(|(i, v)| quantity(v, &format!("{field}[{i}]")))
        .collect()
}

/// Priority fee of the most recent block at one requested percentile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewardPercentile {
    pub percentile: u32,
    /// Gwei, 2 decimal places.
    pub gwei: String,
}

/// Base-fee market data of an EIP-1559 endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeMarket {
    pub encoding: ParamEncoding,
    /// Gwei, 2 decimal places.
    pub latest_base_fee_gwei: String,
    pub average_base_fee_gwei: String,
    /// `reward` was present and non-empty. Independent of base-fee support.
    pub reward_supported: bool,
    /// In request order. `None` when the latest row is shorter than the request.
    pub reward_percentiles: Option<Vec<RewardPercentile>>,
    pub oldest_block: Option<U256>,
    pub base_fee_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FeeHistoryReport {
    /// `baseFeePerGas` present and non-empty.
    Eip1559(FeeMarket),
    /// The call worked but carried no base fees.
    Legacy { encoding: ParamEncoding },
    /// The node said the method or feature is unavailable.
    Unsupported { message: String },
}

impl FeeHistoryReport {
    pub fn eip1559_supported(&self) -> bool {
        matches!(self, Self::Eip1559(_))
    }

    pub fn from_sample(
        sample: &FeeHistorySample,
        encoding: ParamEncoding,
        percentiles: &[u32],
    ) -> Result<Self, ProbeError> {
        let Some(latest) = sample.base_fee_per_gas.last().copied() else {
            return Ok(Self::Legacy { encoding });
        };

        let count = sample.base_fee_per_gas.len();
        let total = sample
            .base_fee_per_gas
            .iter()
            .try_fold(U256::ZERO, |acc, fee| acc.checked_add(*fee))
            .ok_or_else(|| ProbeError::MalformedNumericValue {
                field: "baseFeePerGas".to_string(),
                value: format!("{count} values"),
                reason: "sum exceeds 256 bits".to_string(),
            })?;
        let average = total / U256::from(count);

        let reward_supported = sample.reward.as_ref().is_some_and(|rows| !rows.is_empty());
        let reward_percentiles = sample
            .reward
            .as_ref()
            .and_then(|rows| rows.last())
            .filter(|row| !percentiles.is_empty() && row.len() >= percentiles.len())
            .map(|row| {
                percentiles
                    .iter()
                    .zip(row)
                    .map(|(&percentile, fee)| RewardPercentile {
                        percentile,
                        gwei: wei_to_gwei(*fee),
                    })
                    .collect()
            });

        Ok(Self::Eip1559(FeeMarket {
            encoding,
            latest_base_fee_gwei: wei_to_gwei(latest),
            average_base_fee_gwei: wei_to_gwei(average),
            reward_supported,
            reward_percentiles,
            oldest_block: sample.oldest_block,
            base_fee_count: count,
        }))
    }
}

/// One attempt. The inner `Err` is a JSON-RPC error worth classifying;
/// the outer one fails the probe outright.
async fn attempt(
    session: &RpcSession,
    encoding: ParamEncoding,
    percentiles: &[u32],
) -> Result<Result<Value, JsonRpcError>, ProbeError> {
    let params = vec![
        encoding.block_count(FEE_HISTORY_BLOCK_COUNT),
        Value::String("latest".into()),
        Value::from(percentiles.to_vec()),
    ];
    match call_for_result(session, METHOD, params).await {
        Ok((value, _)) => Ok(Ok(value)),
        Err(ProbeError::Rpc(err)) => Ok(Err(err)),
        Err(e) => Err(e),
    }
}

fn unsupported(err: JsonRpcError) -> FeeHistoryReport {
    tracing::info!(code = err.code, message = %err.message, "fee history not supported; legacy gas pricing");
    FeeHistoryReport::Unsupported {
        message: err.message,
    }
}

pub async fn probe(session: &RpcSession, percentiles: &[u32]) -> Result<FeeHistoryReport, ProbeError> {
    let (encoding, result) = match attempt(session, ParamEncoding::Hex, percentiles).await? {
        Ok(value) => (ParamEncoding::Hex, Ok(value)),
        Err(err) => match classify_fee_history_error(&err.message) {
            FeeErrorClass::UnsupportedFeature => return Ok(unsupported(err)),
            FeeErrorClass::NeedsFallback => {
                tracing::debug!(message = %err.message, "hex block count rejected; retrying with a number");
                (
                    ParamEncoding::Number,
                    attempt(session, ParamEncoding::Number, percentiles).await?,
                )
            }
            FeeErrorClass::Unknown => return Err(ProbeError::Rpc(err)),
        },
    };

    let value = match result {
        Ok(value) => value,
        Err(err) => {
            return match classify_fee_history_error(&err.message) {
                FeeErrorClass::UnsupportedFeature => Ok(unsupported(err)),
                _ => Err(ProbeError::Rpc(err)),
            }
        }
    };

    let sample = FeeHistorySample::from_value(&value)?;
    let report = FeeHistoryReport::from_sample(&sample, encoding, percentiles)?;
    if let FeeHistoryReport::Legacy { .. } = report {
        tracing::info!(%encoding, "fee history carries no base fees; legacy gas pricing");
    }
    Ok(report)
}
