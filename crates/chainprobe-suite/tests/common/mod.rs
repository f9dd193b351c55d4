//! Scripted in-memory transport shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chainprobe_core::{
    HttpVersion, JsonRpcRequest, JsonRpcResponse, RpcResponse, RpcSession, RpcTransport,
    TransportError,
};
use serde_json::{json, Value};

/// What the scripted endpoint does for one call.
#[derive(Clone)]
pub enum Reply {
    Result(Value),
    Error(i64, &'static str),
    /// Envelope with neither `result` nor `error`.
    Empty,
    Timeout,
    Panic,
}

/// Answers each method from a list of replies; the n-th call to a method
/// gets the n-th reply, the last reply repeats once the list runs out.
/// Methods without a script get a `-32601 method not found` error.
pub struct ScriptedTransport {
    script: HashMap<String, Vec<Reply>>,
    protocol: HttpVersion,
    calls: Mutex<Vec<JsonRpcRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self {
            script: HashMap::new(),
            protocol: HttpVersion::Http11,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn on(mut self, method: &str, replies: Vec<Reply>) -> Self {
        self.script.insert(method.to_string(), replies);
        self
    }

    pub fn protocol(mut self, protocol: HttpVersion) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn calls(&self) -> Vec<JsonRpcRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, method: &str) -> Vec<JsonRpcRequest> {
        self.calls()
            .into_iter()
            .filter(|c| c.method == method)
            .collect()
    }
}

#[async_trait]
impl RpcTransport for ScriptedTransport {
    async fn send(&self, req: JsonRpcRequest) -> Result<RpcResponse, TransportError> {
        let nth = {
            let mut calls = self.calls.lock().unwrap();
            let nth = calls.iter().filter(|c| c.method == req.method).count();
            calls.push(req.clone());
            nth
        };

        let reply = match self.script.get(&req.method) {
            Some(replies) => replies[nth.min(replies.len() - 1)].clone(),
            None => Reply::Error(-32601, "method not found"),
        };

        let body = match reply {
            Reply::Result(value) => JsonRpcResponse::success(req.id, value),
            Reply::Error(code, message) => JsonRpcResponse::failure(req.id, code, message),
            Reply::Empty => JsonRpcResponse {
                jsonrpc: "2.0".into(),
                id: req.id,
                result: None,
                error: None,
            },
            Reply::Timeout => return Err(TransportError::Timeout { ms: 10_000 }),
            Reply::Panic => panic!("scripted panic in {}", req.method),
        };

        Ok(RpcResponse {
            body,
            elapsed: Duration::from_millis(5),
            protocol: self.protocol,
            status: Some(200),
        })
    }

    fn url(&self) -> &str {
        "mock://scripted"
    }
}

pub fn ok(value: Value) -> Reply {
    Reply::Result(value)
}

/// A node that passes every probe with an EIP-1559 fee market.
pub fn healthy_node() -> ScriptedTransport {
    ScriptedTransport::new()
        .on("eth_chainId", vec![ok(json!("0x1"))])
        .on(
            "eth_blockNumber",
            vec![
                ok(json!("0x64")),
                ok(json!("0x65")),
                ok(json!("0x66")),
                ok(json!("0x67")),
                ok(json!("0x68")),
            ],
        )
        .on("eth_getBalance", vec![ok(json!("0xde0b6b3a7640000"))])
        .on(
            "eth_feeHistory",
            vec![ok(json!({
                "oldestBlock": "0x5f",
                "baseFeePerGas": ["0x3b9aca00", "0x77359400"],
                "gasUsedRatio": [0.42],
                "reward": [["0x3b9aca00", "0x77359400", "0xb2d05e00"]]
            }))],
        )
        .on("eth_gasPrice", vec![ok(json!("0x4a817c800"))])
}

pub fn session(transport: &Arc<ScriptedTransport>) -> RpcSession {
    RpcSession::new(transport.clone())
}
