//! chainprobe-suite — the adaptive probe engine.
//!
//! Five probes run strictly in sequence against one [`RpcSession`]:
//!
//! 1. [`probes::chain_id`] — `eth_chainId` and network name lookup
//! 2. [`probes::block_activity`] — repeated `eth_blockNumber`, latency and liveness
//! 3. [`probes::balance`] — `eth_getBalance` for the zero address and an optional extra one
//! 4. [`probes::fee_history`] — `eth_feeHistory` with hex→number fallback, EIP-1559 detection
//! 5. [`probes::gas_price`] — `eth_gasPrice`
//!
//! [`ProbeSuite`] isolates every probe (errors and panics alike) and folds
//! the outcomes into a [`SessionSummary`].
//!
//! [`RpcSession`]: chainprobe_core::RpcSession

pub mod classify;
pub mod config;
pub mod error;
pub mod probes;
pub mod runner;
pub mod summary;

pub use classify::{classify_fee_history_error, FeeErrorClass};
pub use config::ProbeConfig;
pub use error::ProbeError;
pub use probes::{ProbeKind, ProbeReport};
pub use runner::{ProbeSuite, SuiteState};
pub use summary::{ProbeOutcome, SessionSummary, Verdict};
