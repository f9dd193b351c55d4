//! Plain-text console report.

use std::fmt::Write;

use chainprobe_suite::probes::fee_history::FeeHistoryReport;
use chainprobe_suite::probes::{
    BalanceReport, BlockActivityReport, ChainIdReport, GasPriceReport,
};
use chainprobe_suite::{ProbeOutcome, ProbeReport, SessionSummary};

fn ms(d: std::time::Duration) -> String {
    format!("{:.1}ms", d.as_secs_f64() * 1000.0)
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}

pub fn render(summary: &SessionSummary) -> String {
    let mut out = String::new();
    for (i, outcome) in summary.outcomes.iter().enumerate() {
        render_outcome(&mut out, i + 1, summary.total(), outcome);
        out.push('\n');
    }
    render_totals(&mut out, summary);
    out
}

fn render_outcome(out: &mut String, n: usize, total: usize, outcome: &ProbeOutcome) {
    let status = if outcome.passed { "PASS" } else { "FAIL" };
    let _ = writeln!(out, "[{n}/{total}] {}: {status}", outcome.name);
    if let Some(cause) = &outcome.cause {
        let _ = writeln!(out, "  Error:           {cause}");
    }
    match &outcome.report {
        Some(ProbeReport::ChainId(r)) => chain_id(out, r),
        Some(ProbeReport::BlockActivity(r)) => block_activity(out, r),
        Some(ProbeReport::Balance(r)) => balance(out, r),
        Some(ProbeReport::FeeHistory(r)) => fee_history(out, r),
        Some(ProbeReport::GasPrice(r)) => gas_price(out, r),
        None => {}
    }
}

fn chain_id(out: &mut String, r: &ChainIdReport) {
    let _ = writeln!(out, "  Chain ID:        {} ({})", r.chain_id, r.network);
    let _ = writeln!(out, "  Latency:         {}", ms(r.elapsed));
    if r.mismatch() {
        if let Some(expected) = r.expected {
            let _ = writeln!(
                out,
                "  Warning:         expected chain id {expected}, endpoint reports {}",
                r.chain_id
            );
        }
    }
}

fn block_activity(out: &mut String, r: &BlockActivityReport) {
    for (i, s) in r.samples.iter().enumerate() {
        let _ = writeln!(
            out,
            "  Sample {}:        block {} in {} over {}",
            i + 1,
            s.block,
            ms(s.elapsed),
            s.protocol
        );
    }
    let _ = writeln!(
        out,
        "  Latency:         avg {} / min {} / max {}",
        ms(r.avg_elapsed),
        ms(r.min_elapsed),
        ms(r.max_elapsed)
    );
    let _ = writeln!(out, "  HTTP/2:          {}", yes_no(r.http2));
    let _ = writeln!(
        out,
        "  Network live:    {}",
        if r.live { "yes (new blocks observed)" } else { "no new blocks observed" }
    );
}

fn balance(out: &mut String, r: &BalanceReport) {
    for b in &r.balances {
        let _ = writeln!(out, "  {}: {} ETH", b.address, b.ether);
    }
}

fn fee_history(out: &mut String, r: &FeeHistoryReport) {
    match r {
        FeeHistoryReport::Eip1559(m) => {
            let _ = writeln!(out, "  EIP-1559:        supported");
            let _ = writeln!(out, "  Param encoding:  {}", m.encoding);
            let _ = writeln!(out, "  Base fee:        {} gwei (latest)", m.latest_base_fee_gwei);
            let _ = writeln!(
                out,
                "  Average:         {} gwei over {} values",
                m.average_base_fee_gwei, m.base_fee_count
            );
            let _ = writeln!(out, "  Reward field:    {}", yes_no(m.reward_supported));
            if let Some(rewards) = &m.reward_percentiles {
                let fees: Vec<String> = rewards
                    .iter()
                    .map(|r| format!("p{} {}", r.percentile, r.gwei))
                    .collect();
                let _ = writeln!(out, "  Priority fees:   {} gwei", fees.join(" / "));
            }
        }
        FeeHistoryReport::Legacy { encoding } => {
            let _ = writeln!(out, "  EIP-1559:        not supported (legacy gas pricing)");
            let _ = writeln!(out, "  Param encoding:  {encoding}");
        }
        FeeHistoryReport::Unsupported { message } => {
            let _ = writeln!(out, "  EIP-1559:        not supported (legacy gas pricing)");
            let _ = writeln!(out, "  Node said:       {message}");
        }
    }
}

fn gas_price(out: &mut String, r: &GasPriceReport) {
    let _ = writeln!(out, "  Gas price:       {} gwei", r.gwei);
}

fn render_totals(out: &mut String, summary: &SessionSummary) {
    let _ = writeln!(out, "Summary for {}", summary.endpoint);
    let _ = writeln!(
        out,
        "  Passed:          {}/{}",
        summary.passed_count,
        summary.total()
    );
    let _ = writeln!(out, "  Failed:          {}", summary.failed_count);
    if let Some(id) = summary.chain_id {
        let _ = writeln!(out, "  Chain ID:        {id}");
    }
    if let Some(block) = summary.latest_block {
        let _ = writeln!(out, "  Latest block:    {block}");
    }
    if let Some(eip1559) = summary.eip1559_supported {
        let _ = writeln!(out, "  EIP-1559:        {}", yes_no(eip1559));
    }
    let _ = writeln!(out, "  Verdict:         endpoint is {}", summary.verdict());
}
