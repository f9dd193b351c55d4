//! Probe-level error types.

use chainprobe_core::request::JsonRpcError;
use chainprobe_core::units::NumericError;
use chainprobe_core::TransportError;
use thiserror::Error;

/// Why a probe failed.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// No response envelope: connection failure, timeout, unparseable body.
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// The node answered with a JSON-RPC error object.
    #[error("{0}")]
    Rpc(JsonRpcError),

    /// A quantity field is neither a hex string nor an integer.
    #[error("malformed numeric value in {field}: {value} ({reason})")]
    MalformedNumericValue {
        field: String,
        value: String,
        reason: String,
    },

    /// Neither `result` nor `error` was populated, or `result` was empty.
    #[error("{method} returned no result")]
    MissingResult { method: String },

    /// The result has the wrong JSON shape (e.g. a string where an object is expected).
    #[error("unexpected shape for {field}: expected {expected}")]
    UnexpectedShape {
        field: String,
        expected: &'static str,
    },

    /// The probe panicked; the runner caught it.
    #[error("probe panicked: {0}")]
    Panicked(String),
}

impl ProbeError {
    pub(crate) fn numeric(field: impl Into<String>, err: NumericError) -> Self {
        Self::MalformedNumericValue {
            field: field.into(),
            value: err.value,
            reason: err.reason.to_string(),
        }
    }

    pub(crate) fn missing(method: &str) -> Self {
        Self::MissingResult {
            method: method.to_string(),
        }
    }
}
