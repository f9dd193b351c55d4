//! The probe suite runner: `Idle → Running → Complete`.
//!
//! Probes run one at a time in [`ProbeKind::ALL`] order. Each is isolated:
//! an error or a panic becomes a failed [`ProbeOutcome`] and the next probe
//! runs regardless.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use chainprobe_core::RpcSession;
use futures::FutureExt;

use crate::config::ProbeConfig;
use crate::error::ProbeError;
use crate::probes::{self, ProbeKind, ProbeReport};
use crate::summary::{ProbeOutcome, SessionSummary};

/// Lifecycle of a [`ProbeSuite`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteState {
    Idle,
    Running,
    Complete,
}

impl std::fmt::Display for SuiteState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Running => write!(f, "running"),
            Self::Complete => write!(f, "complete"),
        }
    }
}

pub struct ProbeSuite {
    session: RpcSession,
    config: ProbeConfig,
    state: SuiteState,
    summary: Option<SessionSummary>,
}

impl ProbeSuite {
    pub fn new(session: RpcSession, config: ProbeConfig) -> Self {
        Self {
            session,
            config,
            state: SuiteState::Idle,
            summary: None,
        }
    }

    pub fn state(&self) -> SuiteState {
        self.state
    }

    /// The summary of a completed run.
    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    /// Run every probe once. A second call returns the stored summary.
    pub async fn run(&mut self) -> SessionSummary {
        if let Some(summary) = &self.summary {
            tracing::warn!("probe suite already complete; returning stored summary");
            return summary.clone();
        }

        self.state = SuiteState::Running;
        let mut summary = SessionSummary::new(self.session.url());
        for kind in ProbeKind::ALL {
            let outcome = self.run_probe(kind).await;
            summary.record(outcome);
        }
        self.state = SuiteState::Complete;

        tracing::info!(
            passed = summary.passed_count,
            failed = summary.failed_count,
            verdict = %summary.verdict(),
            "probe suite complete"
        );
        self.summary = Some(summary.clone());
        summary
    }

    async fn run_probe(&self, kind: ProbeKind) -> ProbeOutcome {
        let fut = self.dispatch(kind);
        let result = match AssertUnwindSafe(fut).catch_unwind().await {
            Ok(result) => result,
            Err(payload) => Err(ProbeError::Panicked(panic_message(payload.as_ref()))),
        };

        match result {
            Ok(report) => {
                tracing::info!(probe = %kind, "probe passed");
                ProbeOutcome::passed(kind, report)
            }
            Err(e) => {
                tracing::warn!(probe = %kind, error = %e, "probe failed");
                ProbeOutcome::failed(kind, e.to_string())
            }
        }
    }

    async fn dispatch(&self, kind: ProbeKind) -> Result<ProbeReport, ProbeError> {
        let session = &self.session;
        let config = &self.config;
        match kind {
            ProbeKind::ChainId => probes::chain_id::probe(session, config.expected_chain_id)
                .await
                .map(ProbeReport::ChainId),
            ProbeKind::BlockActivity => probes::block_activity::probe(session, config.block_samples)
                .await
                .map(ProbeReport::BlockActivity),
            ProbeKind::Balance => probes::balance::probe(session, config.extra_balance_address)
                .await
                .map(ProbeReport::Balance),
            ProbeKind::FeeHistory => probes::fee_history::probe(session, &config.reward_percentiles)
                .await
                .map(ProbeReport::FeeHistory),
            ProbeKind::GasPrice => probes::gas_price::probe(session)
                .await
                .map(ProbeReport::GasPrice),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_payloads() {
        let boxed: Box<dyn Any + Send> = Box::new("static str");
        assert_eq!(panic_message(boxed.as_ref()), "static str");
        let boxed: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(boxed.as_ref()), "owned");
        let boxed: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(boxed.as_ref()), "unknown panic payload");
    }
}
