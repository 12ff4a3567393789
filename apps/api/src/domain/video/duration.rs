//! Video durations are stored as JSON because older rows hold `"MM:SS"`
//! strings instead of a number of seconds. Reads go through
//! [`normalize_duration`] so such rows never fail to load.

use serde_json::Value;

/// Seconds represented by a stored duration value.
///
/// Numbers are taken as seconds (negative or non-finite values become 0).
/// Strings are parsed as `"SS"`, `"MM:SS"` or `"H:MM:SS"`, with unparsable
/// components counting as 0. A clock too large for an `i64` is 0, as is
/// anything else.
pub fn normalize_duration(raw: &Value) -> i64 {
    match raw {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .unwrap_or(0)
            .max(0),
        Value::String(s) => parse_clock(s),
        _ => 0,
    }
}

fn parse_clock(s: &str) -> i64 {
    let parts: Vec<i64> = s
        .trim()
        .split(':')
        .map(|p| p.trim().parse::<i64>().unwrap_or(0).max(0))
        .collect();
    let total = match parts.as_slice() {
        [secs] => Some(*secs),
        [mins, secs] => mins.checked_mul(60).and_then(|m| m.checked_add(*secs)),
        [hours, mins, secs] => hours
            .checked_mul(3600)
            .zip(mins.checked_mul(60))
            .and_then(|(h, m)| h.checked_add(m))
            .and_then(|hm| hm.checked_add(*secs)),
        _ => None,
    };
    total.unwrap_or(0)
}

/// Whether a stored value is already in canonical form (a non-negative integer).
pub fn is_canonical(raw: &Value) -> bool {
    raw.as_i64().is_some_and(|n| n >= 0)
}
