//! Quantity normalization and wei scaling.
//!
//! Nodes disagree on how they encode quantities: most send `0x`-prefixed
//! hex strings, some send JSON numbers, and a few mix both inside one array.
//! Everything is normalized to [`U256`] before arithmetic happens.

use alloy_primitives::U256;
use serde_json::Value;
use thiserror::Error;

/// Decimals of ether relative to wei.
pub const ETHER_DECIMALS: u8 = 18;
/// Decimals of gwei relative to wei.
pub const GWEI_DECIMALS: u8 = 9;

/// Display precision used by [`wei_to_ether`].
pub const ETHER_DISPLAY_PRECISION: u8 = 6;
/// Display precision used by [`wei_to_gwei`].
pub const GWEI_DISPLAY_PRECISION: u8 = 2;

/// A value that is neither a `0x` hex quantity nor a non-negative integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed numeric value {value}: {reason}")]
pub struct NumericError {
    /// The offending value, rendered as JSON.
    pub value: String,
    pub reason: &'static str,
}

impl NumericError {
    fn new(value: &Value, reason: &'static str) -> Self {
        Self {
            value: value.to_string(),
            reason,
        }
    }
}

/// Normalize a hex string (`"0x3b9aca00"`) or JSON number (`1000000000`)
/// into a [`U256`].
pub fn hex_or_number_to_u256(value: &Value) -> Result<U256, NumericError> {
    match value {
        Value::String(s) => {
            let digits = s
                .strip_prefix("0x")
                .ok_or_else(|| NumericError::new(value, "missing 0x prefix"))?;
            if digits.is_empty() {
                return Err(NumericError::new(value, "no hex digits"));
            }
            if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(NumericError::new(value, "invalid hex digit"));
            }
            U256::from_str_radix(digits, 16)
                .map_err(|_| NumericError::new(value, "exceeds 256 bits"))
        }
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                return Ok(U256::from(v));
            }
            if n.is_i64() {
                return Err(NumericError::new(value, "negative number"));
            }
            // `arbitrary_precision` keeps the literal text, so wide integers
            // are parsed exactly instead of through an f64.
            decimal_literal_to_u256(&n.to_string()).map_err(|reason| NumericError::new(value, reason))
        }
        _ => Err(NumericError::new(value, "expected hex string or number")),
    }
}

/// Exact integer value of a JSON number literal such as `123456789012345678901`,
/// `1e40` or `2.5E3`. Anything with a non-zero fractional part is rejected.
fn decimal_literal_to_u256(text: &str) -> Result<U256, &'static str> {
    if text.starts_with('-') {
        return Err("negative number");
    }
    let (mantissa, exponent) = match text.find(['e', 'E']) {
        Some(i) => {
            let exp = text[i + 1..]
                .trim_start_matches('+')
                .parse::<i64>()
                .map_err(|_| "invalid exponent")?;
            (&text[..i], exp)
        }
        None => (text, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let mut digits = format!("{int_part}{frac_part}");
    let mut exponent = exponent - frac_part.len() as i64;

    // Fold trailing zeros into the exponent; a negative exponent left over
    // means a fractional value.
    while exponent < 0 && digits.ends_with('0') {
        digits.pop();
        exponent += 1;
    }
    if exponent < 0 {
        return Err("not a non-negative integer");
    }
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err("not a non-negative integer");
    }

    let base = U256::from_str_radix(digits, 10).map_err(|_| "exceeds 256 bits")?;
    let exponent = usize::try_from(exponent).map_err(|_| "exceeds 256 bits")?;
    let scale = U256::from(10u8)
        .checked_pow(U256::from(exponent))
        .ok_or("exceeds 256 bits")?;
    base.checked_mul(scale).ok_or("exceeds 256 bits")
}

/// Narrow a quantity to `u64` (block numbers, chain ids).
pub fn u256_to_u64(value: U256) -> Option<u64> {
    u64::try_from(value).ok()
}

/// Render `value / 10^decimals` with `precision` fractional digits,
/// rounding half up.
pub fn format_units(value: U256, decimals: u8, precision: u8) -> String {
    let precision = precision.min(decimals);
    let ten = U256::from(10u8);
    let divisor = ten.pow(U256::from(decimals - precision));
    let scaled = value.saturating_add(divisor / U256::from(2u8)) / divisor;
    if precision == 0 {
        return scaled.to_string();
    }
    let unit = ten.pow(U256::from(precision));
    let whole = scaled / unit;
    let frac = (scaled % unit).to_string();
    format!("{whole}.{frac:0>width$}", width = precision as usize)
}

/// Wei → ether, 6 decimal places.
pub fn wei_to_ether(wei: U256) -> String {
    format_units(wei, ETHER_DECIMALS, ETHER_DISPLAY_PRECISION)
}

/// Wei → gwei, 2 decimal places.
pub fn wei_to_gwei(wei: U256) -> String {
    format_units(wei, GWEI_DECIMALS, GWEI_DISPLAY_PRECISION)
}
