//! Lenient serde helpers for loosely-typed backend fields
//!
//! The backend assembles its payload from several upstream sources and
//! gives no type guarantees for individual values. These helpers decode a
//! field to `None` on any shape mismatch instead of failing the whole
//! body, preserving the value-vs-absent distinction the view-model relies
//! on.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode an optional float from a number, numeric string, or anything else
///
/// Non-numeric shapes (including `null`) decode to `None`, never to zero.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Decode an optional string, treating any non-string shape as absent
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}
