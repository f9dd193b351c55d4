//! Positional argument parsing.

use anyhow::{anyhow, bail, Context, Result};
use reqwest::Url;

/// What the user asked for.
#[derive(Debug, PartialEq)]
pub enum Command {
    Probe(ProbeArgs),
    Help,
    Version,
}

#[derive(Debug, PartialEq)]
pub struct ProbeArgs {
    pub url: Url,
    pub expected_chain_id: Option<i128>,
    pub json: bool,
}

/// Parse `chainprobe <URL> [EXPECTED_CHAIN_ID] [--json]`.
pub fn parse(args: &[String]) -> Result<Command> {
    let mut positional = Vec::new();
    let mut json = false;

    for arg in args {
        match arg.as_str() {
            "help" | "--help" | "-h" => return Ok(Command::Help),
            "version" | "--version" | "-V" => return Ok(Command::Version),
            "--json" => json = true,
            flag if flag.starts_with("--") => bail!("unknown flag: {flag}"),
            value => positional.push(value),
        }
    }

    let mut positional = positional.into_iter();
    let raw_url = positional.next().ok_or_else(|| anyhow!("endpoint URL is required"))?;
    let url = parse_url(raw_url)?;

    let expected_chain_id = positional
        .next()
        .map(|raw| {
            raw.parse::<i128>()
                .with_context(|| format!("expected chain id must be an integer, got {raw:?}"))
        })
        .transpose()?;

    if let Some(extra) = positional.next() {
        bail!("unexpected argument: {extra}");
    }

    Ok(Command::Probe(ProbeArgs {
        url,
        expected_chain_id,
        json,
    }))
}

fn parse_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("invalid endpoint URL {raw:?}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => bail!("unsupported URL scheme {other:?}; use http or https"),
    }
}
