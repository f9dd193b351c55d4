//! chainprobe-core — foundation traits and types for ChainProbe.
//!
//! # Overview
//!
//! ChainProbe runs a one-shot diagnostic against an Ethereum-compatible
//! JSON-RPC endpoint. The core crate defines:
//!
//! - [`RpcTransport`] — the async trait every transport implements
//! - [`RpcSession`] — one endpoint session with monotonically increasing ids
//! - [`JsonRpcRequest`] / [`JsonRpcResponse`] — wire types
//! - [`RpcResponse`] — a response envelope plus timing and protocol metadata
//! - [`TransportError`] — structured error type
//! - [`units`] module — hex/number normalization and wei scaling
//! - [`chains`] module — known chain ids

pub mod chains;
pub mod error;
pub mod request;
pub mod transport;
pub mod units;

pub use error::TransportError;
pub use request::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, RpcId, RpcParam};
pub use transport::{HttpVersion, RpcResponse, RpcSession, RpcTransport};
pub use units::{hex_or_number_to_u256, wei_to_ether, wei_to_gwei, NumericError};

pub use alloy_primitives::{Address, U256};
