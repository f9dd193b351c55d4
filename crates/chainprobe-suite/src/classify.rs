//! Error-message classification for `eth_feeHistory`.
//!
//! Node implementations disagree on how `blockCount` is encoded and on how
//! they say "I don't do EIP-1559". The only signal we get is the free-form
//! error message, so the matching rules live here as plain data.

use serde::Serialize;

/// Substrings that indicate the node choked on the parameter encoding.
pub const FALLBACK_MARKERS: &[&str] = &[
    "unmarshal",
    "destruct",
    "parse",
    "invalid",
    "type",
    "expected",
];

/// Substrings that indicate the method (or fee market) is unavailable.
pub const UNSUPPORTED_MARKERS: &[&str] = &["not found", "not supported"];

/// What an `eth_feeHistory` error message means for the probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FeeErrorClass {
    /// Parameter encoding was rejected: retry with a numeric block count.
    NeedsFallback,
    /// The endpoint does not offer fee history at all.
    UnsupportedFeature,
    /// Anything else.
    Unknown,
}

/// Classify an error message. Matching is case-sensitive.
///
/// `UnsupportedFeature` takes precedence over `NeedsFallback`, so a message
/// carrying both kinds of marker ends the probe without another attempt.
pub fn classify_fee_history_error(message: &str) -> FeeErrorClass {
    if UNSUPPORTED_MARKERS.iter().any(|m| message.contains(m)) {
        FeeErrorClass::UnsupportedFeature
    } else if FALLBACK_MARKERS.iter().any(|m| message.contains(m)) {
        FeeErrorClass::NeedsFallback
    } else {
        FeeErrorClass::Unknown
    }
}
