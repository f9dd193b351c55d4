//! chainprobe CLI — diagnose an Ethereum JSON-RPC endpoint from the terminal.
//!
//! Usage:
//! ```bash
//! # Probe an endpoint
//! chainprobe https://cloudflare-eth.com
//!
//! # Warn if the endpoint is not on the expected chain
//! chainprobe https://cloudflare-eth.com 1
//!
//! # Also check the balance of a specific account
//! CHAINPROBE_TEST_ADDRESS=0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045 chainprobe https://cloudflare-eth.com
//!
//! # Machine-readable summary
//! chainprobe https://cloudflare-eth.com --json
//! ```
//!
//! Exit status is `0` only when every probe passed.

mod args;
mod render;

use std::env;
use std::process;
use std::str::FromStr;
use std::sync::Arc;

use alloy_primitives::Address;
use anyhow::{Context, Result};
use chainprobe_core::RpcSession;
use chainprobe_http::HttpRpcClient;
use chainprobe_suite::{ProbeConfig, ProbeSuite};
use tracing_subscriber::EnvFilter;

use args::{Command, ProbeArgs};

/// Optional second balance-probe target.
const TEST_ADDRESS_VAR: &str = "CHAINPROBE_TEST_ADDRESS";

#[tokio::main]
async fn main() {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let probe_args = match args::parse(&args) {
        Ok(Command::Probe(p)) => p,
        Ok(Command::Help) => {
            print_usage();
            return;
        }
        Ok(Command::Version) => {
            println!("chainprobe {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        Err(e) => {
            eprintln!("Error: {e:#}\n");
            print_usage();
            process::exit(1);
        }
    };

    match run(probe_args).await {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_usage() {
    println!("chainprobe {}", env!("CARGO_PKG_VERSION"));
    println!("Diagnose an Ethereum JSON-RPC endpoint\n");
    println!("USAGE:");
    println!("    chainprobe <URL> [EXPECTED_CHAIN_ID] [--json]\n");
    println!("ARGS:");
    println!("    <URL>                http(s) JSON-RPC endpoint  [required]");
    println!("    [EXPECTED_CHAIN_ID]  warn if the endpoint reports a different chain id\n");
    println!("FLAGS:");
    println!("    --json               print the summary as JSON");
    println!("    -h, --help           print this help");
    println!("    -V, --version        print version\n");
    println!("ENVIRONMENT:");
    println!("    {TEST_ADDRESS_VAR}  extra account for the balance probe");
    println!("    RUST_LOG                 log filter (default: warn)");
}

fn test_address_from_env() -> Result<Option<Address>> {
    match env::var(TEST_ADDRESS_VAR) {
        Ok(raw) if !raw.trim().is_empty() => Address::from_str(raw.trim())
            .map(Some)
            .with_context(|| format!("{TEST_ADDRESS_VAR} is not a valid address: {raw:?}")),
        _ => Ok(None),
    }
}

async fn run(args: ProbeArgs) -> Result<i32> {
    let config = ProbeConfig {
        expected_chain_id: args.expected_chain_id,
        extra_balance_address: test_address_from_env()?,
        ..Default::default()
    };

    let client = HttpRpcClient::default_for(args.url.as_str())
        .context("failed to set up HTTP transport")?;
    let session = RpcSession::new(Arc::new(client));
    tracing::debug!(
        url = %args.url,
        expected_chain_id = ?config.expected_chain_id,
        extra_address = ?config.extra_balance_address,
        "starting probe suite"
    );

    if !args.json {
        println!("Probing {}...\n", args.url);
    }

    let mut suite = ProbeSuite::new(session, config);
    let summary = suite.run().await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render::render(&summary));
    }

    Ok(summary.exit_code())
}
