//! `eth_getBalance` probe.

use alloy_primitives::{Address, U256};
use chainprobe_core::units::wei_to_ether;
use chainprobe_core::RpcSession;
use serde::Serialize;
use serde_json::Value;

use super::{call_for_result, quantity};
use crate::error::ProbeError;

const METHOD: &str = "eth_getBalance";

#[derive(Debug, Clone, Serialize)]
pub struct AccountBalance {
    pub address: Address,
    pub wei: U256,
    /// Ether, 6 decimal places.
    pub ether: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BalanceReport {
    pub balances: Vec<AccountBalance>,
}

/// Addresses queried, zero address first.
pub fn targets(extra: Option<Address>) -> Vec<Address> {
    std::iter::once(Address::ZERO).chain(extra).collect()
}

pub async fn probe(session: &RpcSession, extra: Option<Address>) -> Result<BalanceReport, ProbeError> {
    let mut balances = Vec::new();
    for address in targets(extra) {
        let params = vec![Value::String(address.to_string()), Value::String("latest".into())];
        let (value, _) = call_for_result(session, METHOD, params).await?;
        let wei = quantity(&value, METHOD)?;
        tracing::debug!(%address, %wei, "balance");
        balances.push(AccountBalance {
            address,
            wei,
            ether: wei_to_ether(wei),
        });
    }
    Ok(BalanceReport { balances })
}
