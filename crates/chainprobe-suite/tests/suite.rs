//! End-to-end runs of the probe suite.

mod common;

use std::sync::Arc;

use alloy_primitives::Address;
use chainprobe_core::RpcId;
use chainprobe_suite::{ProbeConfig, ProbeKind, ProbeReport, ProbeSuite, SuiteState, Verdict};
use common::{healthy_node, ok, session, Reply, ScriptedTransport};
use serde_json::json;

#[tokio::test]
async fn healthy_endpoint_passes_everything() {
    let t = Arc::new(healthy_node());
    let config = ProbeConfig::default().with_extra_balance_address(Address::repeat_byte(0x01));
    let mut suite = ProbeSuite::new(session(&t), config);
    assert_eq!(suite.state(), SuiteState::Idle);

    let summary = suite.run().await;

    assert_eq!(suite.state(), SuiteState::Complete);
    assert_eq!(summary.passed_count, 5);
    assert_eq!(summary.failed_count, 0);
    assert_eq!(summary.chain_id, Some(1));
    assert_eq!(summary.latest_block, Some(0x68));
    assert_eq!(summary.eip1559_supported, Some(true));
    assert_eq!(summary.verdict(), Verdict::FullyFunctional);
    assert_eq!(summary.exit_code(), 0);

    let kinds: Vec<ProbeKind> = summary.outcomes.iter().map(|o| o.kind).collect();
    assert_eq!(kinds, ProbeKind::ALL.to_vec());
}

#[tokio::test]
async fn calls_are_sequential_with_increasing_ids() {
    let t = Arc::new(healthy_node());
    let mut suite = ProbeSuite::new(session(&t), ProbeConfig::default());
    suite.run().await;

    let calls = t.calls();
    let methods: Vec<&str> = calls.iter().map(|c| c.method.as_str()).collect();
    assert_eq!(
        methods,
        vec![
            "eth_chainId",
            "eth_blockNumber",
            "eth_blockNumber",
            "eth_blockNumber",
            "eth_blockNumber",
            "eth_blockNumber",
            "eth_getBalance",
            "eth_feeHistory",
            "eth_gasPrice",
        ]
    );
    let ids: Vec<RpcId> = calls.iter().map(|c| c.id.clone()).collect();
    let expected: Vec<RpcId> = (1..=calls.len() as u64).map(RpcId::Number).collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn fee_history_method_not_found_still_exits_zero() {
    let t = Arc::new(healthy_node().on(
        "eth_feeHistory",
        vec![Reply::Error(-32601, "method not found")],
    ));
    let mut suite = ProbeSuite::new(session(&t), ProbeConfig::default());
    let summary = suite.run().await;

    assert_eq!(summary.eip1559_supported, Some(false));
    assert_eq!(summary.passed_count, 5);
    assert!(summary.outcomes[3].passed);
    assert_eq!(summary.exit_code(), 0);
}

#[tokio::test]
async fn panicking_probe_is_isolated() {
    let t = Arc::new(healthy_node().on("eth_getBalance", vec![Reply::Panic]));
    let mut suite = ProbeSuite::new(session(&t), ProbeConfig::default());
    let summary = suite.run().await;

    assert_eq!(summary.passed_count, 4);
    assert_eq!(summary.failed_count, 1);
    let balance = &summary.outcomes[2];
    assert_eq!(balance.kind, ProbeKind::Balance);
    assert!(!balance.passed);
    assert!(balance.cause.as_deref().unwrap().contains("panicked"));
    // Probes after the panic still ran.
    assert_eq!(t.calls_to("eth_feeHistory").len(), 1);
    assert_eq!(t.calls_to("eth_gasPrice").len(), 1);
    assert_eq!(summary.verdict(), Verdict::PartiallyFunctional);
    assert_eq!(summary.exit_code(), 1);
}

#[tokio::test]
async fn dead_endpoint_is_down() {
    let t = Arc::new(
        ScriptedTransport::new()
            .on("eth_chainId", vec![Reply::Timeout])
            .on("eth_blockNumber", vec![Reply::Timeout])
            .on("eth_getBalance", vec![Reply::Timeout])
            .on("eth_feeHistory", vec![Reply::Timeout])
            .on("eth_gasPrice", vec![Reply::Timeout]),
    );
    let mut suite = ProbeSuite::new(session(&t), ProbeConfig::default());
    let summary = suite.run().await;

    assert_eq!(summary.passed_count, 0);
    assert_eq!(summary.failed_count, 5);
    assert_eq!(summary.chain_id, None);
    assert_eq!(summary.latest_block, None);
    assert_eq!(summary.eip1559_supported, None);
    assert_eq!(summary.verdict(), Verdict::DownOrMisconfigured);
    assert_eq!(summary.exit_code(), 1);
    // No retries.
    assert_eq!(t.calls().len(), 5);
}

#[tokio::test]
async fn chain_id_mismatch_does_not_fail_the_run() {
    let t = Arc::new(healthy_node());
    let mut suite = ProbeSuite::new(session(&t), ProbeConfig::default().with_expected_chain_id(137));
    let summary = suite.run().await;

    assert_eq!(summary.exit_code(), 0);
    match &summary.outcomes[0].report {
        Some(ProbeReport::ChainId(report)) => assert!(report.mismatch()),
        other => panic!("expected chain id report, got {other:?}"),
    }
}

#[tokio::test]
async fn second_run_returns_stored_summary() {
    let t = Arc::new(healthy_node());
    let mut suite = ProbeSuite::new(session(&t), ProbeConfig::default());
    let first = suite.run().await;
    let calls_after_first = t.calls().len();

    let second = suite.run().await;
    assert_eq!(t.calls().len(), calls_after_first);
    assert_eq!(first.passed_count, second.passed_count);
    assert!(suite.summary().is_some());
}

#[tokio::test]
async fn summary_serializes_to_json() {
    let t = Arc::new(healthy_node().on("eth_gasPrice", vec![ok(json!(null))]));
    let mut suite = ProbeSuite::new(session(&t), ProbeConfig::default());
    let summary = suite.run().await;

    let value = serde_json::to_value(&summary).unwrap();
    assert_eq!(value["passed_count"], json!(4));
    assert_eq!(value["failed_count"], json!(1));
    assert_eq!(value["chain_id"], json!(1));
    assert_eq!(value["outcomes"][0]["report"]["probe"], json!("chain_id"));
    assert_eq!(value["outcomes"][3]["report"]["status"], json!("eip1559"));
    assert_eq!(value["outcomes"][4]["passed"], json!(false));
    assert_eq!(value["outcomes"][4]["cause"], json!("eth_gasPrice returned no result"));
}
