//! The `RpcTransport` trait and the per-endpoint `RpcSession`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::TransportError;
use crate::request::{JsonRpcRequest, JsonRpcResponse};

/// Negotiated HTTP protocol version of a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HttpVersion {
    Http09,
    Http10,
    Http11,
    Http2,
    Http3,
    /// Non-HTTP transports or versions the client does not recognise.
    Unknown,
}

impl HttpVersion {
    /// Returns `true` for HTTP/2 and later.
    pub fn is_http2_or_newer(&self) -> bool {
        matches!(self, Self::Http2 | Self::Http3)
    }
}

impl std::fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http09 => write!(f, "HTTP/0.9"),
            Self::Http10 => write!(f, "HTTP/1.0"),
            Self::Http11 => write!(f, "HTTP/1.1"),
            Self::Http2 => write!(f, "HTTP/2"),
            Self::Http3 => write!(f, "HTTP/3"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// A JSON-RPC response envelope together with call metadata.
#[derive(Debug, Clone)]
pub struct RpcResponse {
    /// The parsed envelope (result or error).
    pub body: JsonRpcResponse,
    /// Wall-clock time from request write to response body complete.
    pub elapsed: Duration,
    /// Negotiated protocol version.
    pub protocol: HttpVersion,
    /// Raw HTTP status code, if the transport has one.
    pub status: Option<u16>,
}

impl RpcResponse {
    /// Borrow the `result` member, if present and not `null`.
    pub fn result(&self) -> Option<&Value> {
        self.body.result.as_ref()
    }
}

/// The central async trait every RPC transport must implement.
///
/// Implementations send exactly one request per call and never retry.
/// The trait is object-safe and can be stored as `Arc<dyn RpcTransport>`.
#[async_trait]
pub trait RpcTransport: Send + Sync + 'static {
    /// Send a single JSON-RPC request and return the response envelope.
    async fn send(&self, req: JsonRpcRequest) -> Result<RpcResponse, TransportError>;

    /// Return the transport's identifier (URL or name).
    fn url(&self) -> &str;
}

/// One diagnostic session against one endpoint.
///
/// Owns the request id counter: ids start at 1 and strictly increase for
/// the lifetime of the session.
pub struct RpcSession {
    transport: Arc<dyn RpcTransport>,
    next_id: AtomicU64,
}

impl RpcSession {
    pub fn new(transport: Arc<dyn RpcTransport>) -> Self {
        Self {
            transport,
            next_id: AtomicU64::new(1),
        }
    }

    /// The endpoint this session talks to.
    pub fn url(&self) -> &str {
        self.transport.url()
    }

    /// Build a request with the next id and send it.
    pub async fn request(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<RpcResponse, TransportError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let req = JsonRpcRequest::new(id, method, params);
        match self.transport.send(req).await {
            Ok(resp) => {
                tracing::debug!(
                    method,
                    id,
                    status = ?resp.status,
                    protocol = %resp.protocol,
                    elapsed_ms = resp.elapsed.as_millis() as u64,
                    rpc_error = resp.body.error.is_some(),
                    "rpc call completed"
                );
                Ok(resp)
            }
            Err(e) => {
                tracing::debug!(method, id, error = %e, "rpc call failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RpcId;
    use std::sync::Mutex;

    struct RecordingTransport {
        ids: Mutex<Vec<RpcId>>,
    }

    #[async_trait]
    impl RpcTransport for RecordingTransport {
        async fn send(&self, req: JsonRpcRequest) -> Result<RpcResponse, TransportError> {
            self.ids.lock().unwrap().push(req.id.clone());
            Ok(RpcResponse {
                body: JsonRpcResponse::success(req.id, Value::String("0x1".into())),
                elapsed: Duration::from_millis(3),
                protocol: HttpVersion::Http11,
                status: Some(200),
            })
        }
        fn url(&self) -> &str {
            "mock://recording"
        }
    }

    #[tokio::test]
    async fn ids_strictly_increase() {
        let transport = Arc::new(RecordingTransport { ids: Mutex::new(vec![]) });
        let session = RpcSession::new(transport.clone());
        for method in ["eth_chainId", "eth_blockNumber", "eth_gasPrice"] {
            let resp = session.request(method, vec![]).await.unwrap();
            assert_eq!(resp.result(), Some(&Value::String("0x1".into())));
        }
        let ids = transport.ids.lock().unwrap().clone();
        assert_eq!(ids, vec![RpcId::Number(1), RpcId::Number(2), RpcId::Number(3)]);
        assert_eq!(session.url(), "mock://recording");
    }

    #[test]
    fn http2_detection() {
        assert!(HttpVersion::Http2.is_http2_or_newer());
        assert!(HttpVersion::Http3.is_http2_or_newer());
        assert!(!HttpVersion::Http11.is_http2_or_newer());
        assert_eq!(HttpVersion::Http11.to_string(), "HTTP/1.1");
    }
}
