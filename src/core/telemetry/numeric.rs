//! Lenient numeric parsing for sensor strings.

use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("leading number pattern is valid")
});

/// Parse the longest leading decimal number of `raw`.
///
/// Unit suffixes are ignored: `"45.5°C"` is 45.5 and `"600 RPM"` is 600.
/// Returns `None` when the string does not start with a number.
pub fn parse_leading_number(raw: &str) -> Option<f64> {
    LEADING_NUMBER
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Integer part of the leading number, for RPM style readings.
pub fn parse_leading_integer(raw: &str) -> Option<i64> {
    parse_leading_number(raw).map(|v| v.trunc() as i64)
}

/// Temperature rounded up to the next whole degree.
pub fn ceil_celsius(raw: &str) -> Option<i64> {
    parse_leading_number(raw).map(|t| t.ceil() as i64)
}
