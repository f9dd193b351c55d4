//! chainprobe-http — HTTP(S) JSON-RPC transport for ChainProbe.
//!
//! # Features
//! - One POST per request, no retry
//! - Fixed per-call timeout (10 seconds by default)
//! - Reports elapsed time, negotiated HTTP version and status code
//! - HTTP/2 via ALPN when the endpoint offers it

pub mod client;

pub use client::{HttpClientConfig, HttpRpcClient, DEFAULT_REQUEST_TIMEOUT};
