//! Ingestion-edge coercion for values arriving from the remote API.
//!
//! The upstream API is untyped: check-in flags show up as `0`/`1`, `true`/
//! `false` or not at all, and counts are sometimes strings. These helpers run
//! once inside `Deserialize` so the rest of the crate only sees `bool`, `u64`
//! and `Option<i64>`.
//!
//! Use with `#[serde(default, deserialize_with = "lenient::flag")]` (or
//! `count` / `opt_id`); `default` covers the absent-field case.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `true` only for the number `1` or the boolean `true`.
pub fn flag_value(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64() == Some(1.0),
        _ => false,
    }
}

/// Non-negative integral count; anything unusable becomes 0.
pub fn count_value(value: Option<&Value>) -> u64 {
    let n = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                Some(0.0)
            } else {
                s.parse::<f64>().ok()
            }
        }
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    match n {
        Some(x) if x.is_finite() && x > 0.0 => x.trunc() as u64,
        _ => 0,
    }
}

/// Numeric identifier from a number or numeric string.
pub fn id_value(value: Option<&Value>) -> Option<i64> {
    match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(flag_value(value.as_ref()))
}

pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(count_value(value.as_ref()))
}

pub fn opt_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(id_value(value.as_ref()))
}

pub fn id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(id_value(value.as_ref()).unwrap_or(0))
}
