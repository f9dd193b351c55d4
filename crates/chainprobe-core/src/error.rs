//! Transport-level error types.

use thiserror::Error;

/// Errors that prevent a JSON-RPC response envelope from being produced.
///
/// A JSON-RPC `error` object returned by the node is *not* a transport
/// error: it arrives inside a successful [`RpcResponse`](crate::RpcResponse).
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed (connection refused, TLS failure, reset, etc.).
    #[error("HTTP error: {0}")]
    Http(String),

    /// Request timed out after the configured duration.
    #[error("Request timed out after {ms}ms")]
    Timeout { ms: u64 },

    /// The response body is not a JSON-RPC envelope.
    #[error("Malformed response body (HTTP {status}): {reason}")]
    MalformedBody { status: u16, reason: String },

    /// An unexpected error.
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Returns `true` if the call was abandoned because of the timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
