//! Probe outcomes and the session scorecard.

use serde::Serialize;

use crate::probes::{ProbeKind, ProbeReport};

/// Result of one probe. Created once, never modified.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeOutcome {
    pub name: String,
    pub kind: ProbeKind,
    pub passed: bool,
    /// Human-readable failure cause.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ProbeReport>,
}

impl ProbeOutcome {
    pub fn passed(kind: ProbeKind, report: ProbeReport) -> Self {
        Self {
            name: kind.name().to_string(),
            kind,
            passed: true,
            cause: None,
            report: Some(report),
        }
    }

    pub fn failed(kind: ProbeKind, cause: impl Into<String>) -> Self {
        Self {
            name: kind.name().to_string(),
            kind,
            passed: false,
            cause: Some(cause.into()),
            report: None,
        }
    }
}

/// Overall qualitative verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    FullyFunctional,
    PartiallyFunctional,
    DownOrMisconfigured,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FullyFunctional => write!(f, "fully functional"),
            Self::PartiallyFunctional => write!(f, "partially functional"),
            Self::DownOrMisconfigured => write!(f, "down or misconfigured"),
        }
    }
}

/// Aggregate of one suite run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionSummary {
    pub endpoint: String,
    pub chain_id: Option<u64>,
    pub latest_block: Option<u64>,
    pub eip1559_supported: Option<bool>,
    pub passed_count: usize,
    pub failed_count: usize,
    pub outcomes: Vec<ProbeOutcome>,
}

impl SessionSummary {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Fold one outcome in, capturing whatever headline value it carries.
    pub fn record(&mut self, outcome: ProbeOutcome) {
        if outcome.passed {
            self.passed_count += 1;
        } else {
            self.failed_count += 1;
        }
        match &outcome.report {
            Some(ProbeReport::ChainId(r)) => self.chain_id = Some(r.chain_id),
            Some(ProbeReport::BlockActivity(r)) => self.latest_block = Some(r.latest_block),
            Some(ProbeReport::FeeHistory(r)) => self.eip1559_supported = Some(r.eip1559_supported()),
            _ => {}
        }
        self.outcomes.push(outcome);
    }

    pub fn total(&self) -> usize {
        self.passed_count + self.failed_count
    }

    pub fn verdict(&self) -> Verdict {
        if self.passed_count == 0 {
            Verdict::DownOrMisconfigured
        } else if self.failed_count == 0 {
            Verdict::FullyFunctional
        } else {
            Verdict::PartiallyFunctional
        }
    }

    /// `0` when every probe passed, `1` otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.failed_count == 0 && self.passed_count > 0 {
            0
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probes::GasPriceReport;
    use alloy_primitives::U256;

    fn gas_ok() -> ProbeOutcome {
        ProbeOutcome::passed(
            ProbeKind::GasPrice,
            ProbeReport::GasPrice(GasPriceReport {
                wei: U256::from(1_000_000_000u64),
                gwei: "1.00".into(),
            }),
        )
    }

    #[test]
    fn verdicts() {
        let mut summary = SessionSummary::new("mock://");
        summary.record(ProbeOutcome::failed(ProbeKind::ChainId, "boom"));
        assert_eq!(summary.verdict(), Verdict::DownOrMisconfigured);
        assert_eq!(summary.exit_code(), 1);

        summary.record(gas_ok());
        assert_eq!(summary.verdict(), Verdict::PartiallyFunctional);
        assert_eq!(summary.exit_code(), 1);

        let mut healthy = SessionSummary::new("mock://");
        healthy.record(gas_ok());
        assert_eq!(healthy.verdict(), Verdict::FullyFunctional);
        assert_eq!(healthy.exit_code(), 0);
        assert_eq!(healthy.total(), 1);
    }

    #[test]
    fn failed_outcome_has_cause_and_no_report() {
        let outcome = ProbeOutcome::failed(ProbeKind::Balance, "eth_getBalance returned no result");
        assert!(!outcome.passed);
        assert_eq!(outcome.name, "Balance Queries");
        assert!(outcome.report.is_none());
        assert_eq!(outcome.cause.as_deref(), Some("eth_getBalance returned no result"));
    }

    #[test]
    fn verdict_display() {
        assert_eq!(Verdict::DownOrMisconfigured.to_string(), "down or misconfigured");
    }
}
