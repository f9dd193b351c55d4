//! HTTP JSON-RPC client backed by `reqwest`.
//!
//! The client is deliberately thin: it measures, it does not recover.
//! Whatever the HTTP status, the body is parsed as a JSON-RPC envelope,
//! since plenty of nodes attach a JSON-RPC error to a 4xx/5xx reply.

use async_trait::async_trait;
use std::time::{Duration, Instant};

use chainprobe_core::error::TransportError;
use chainprobe_core::request::{JsonRpcRequest, JsonRpcResponse};
use chainprobe_core::transport::{HttpVersion, RpcResponse, RpcTransport};

/// Per-call timeout used when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for `HttpRpcClient`.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Hard bound on one call, connect through body read.
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            user_agent: concat!("chainprobe/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// HTTP JSON-RPC client.
pub struct HttpRpcClient {
    url: String,
    http: reqwest::Client,
    request_timeout: Duration,
}

impl HttpRpcClient {
    /// Create a new client for the given JSON-RPC endpoint URL.
    pub fn new(url: impl Into<String>, config: HttpClientConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| TransportError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            url: url.into(),
            http,
            request_timeout: config.request_timeout,
        })
    }

    /// Create with default configuration.
    pub fn default_for(url: impl Into<String>) -> Result<Self, TransportError> {
        Self::new(url, HttpClientConfig::default())
    }

    fn map_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout {
                ms: self.request_timeout.as_millis() as u64,
            }
        } else {
            TransportError::Http(e.to_string())
        }
    }
}

fn protocol_of(version: reqwest::Version) -> HttpVersion {
    if version == reqwest::Version::HTTP_09 {
        HttpVersion::Http09
    } else if version == reqwest::Version::HTTP_10 {
        HttpVersion::Http10
    } else if version == reqwest::Version::HTTP_11 {
        HttpVersion::Http11
    } else if version == reqwest::Version::HTTP_2 {
        HttpVersion::Http2
    } else if version == reqwest::Version::HTTP_3 {
        HttpVersion::Http3
    } else {
        HttpVersion::Unknown
    }
}

#[async_trait]
impl RpcTransport for HttpRpcClient {
    async fn send(&self, req: JsonRpcRequest) -> Result<RpcResponse, TransportError> {
        let start = Instant::now();
        let resp = self
            .http
            .post(&self.url)
            .json(&req)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = resp.status().as_u16();
        let protocol = protocol_of(resp.version());
        let bytes = resp.bytes().await.map_err(|e| self.map_error(e))?;
        let elapsed = start.elapsed();

        if !(200..300).contains(&status) {
            tracing::debug!(
                status,
                method = %req.method,
                url = %self.url,
                "non-success HTTP status"
            );
        }

        let body: JsonRpcResponse =
            serde_json::from_slice(&bytes).map_err(|e| TransportError::MalformedBody {
                status,
                reason: e.to_string(),
            })?;

        Ok(RpcResponse {
            body,
            elapsed,
            protocol,
            status: Some(status),
        })
    }

    fn url(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeout_is_ten_seconds() {
        let config = HttpClientConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("chainprobe/"));
    }

    #[test]
    fn version_mapping() {
        assert_eq!(protocol_of(reqwest::Version::HTTP_11), HttpVersion::Http11);
        assert_eq!(protocol_of(reqwest::Version::HTTP_2), HttpVersion::Http2);
        assert_eq!(protocol_of(reqwest::Version::HTTP_10), HttpVersion::Http10);
    }

    #[test]
    fn keeps_url() {
        let client = HttpRpcClient::default_for("https://rpc.example.com").unwrap();
        assert_eq!(client.url(), "https://rpc.example.com");
    }
}
