//! Defensive normalization of the backend narrative reply
//!
//! `normalize_reply` is a total function: whatever shape the backend (or
//! the model behind it) produces, the caller gets a usable
//! [`NormalizedAnalysis`]. Parse trouble degrades the view-model; it
//! never becomes an error the lifecycle has to handle.

use insight_core::report::NormalizedAnalysis;
use insight_core::Confidence;
use serde_json::{Map, Value};
use tracing::debug;

/// Narrative shown when the reply cannot be decoded
pub const PARSE_FALLBACK_TEXT: &str = "Error parsing analysis data.";

/// Normalize the `reply` field of the rich response shape
///
/// A string reply is parsed as JSON (after stripping a markdown code
/// fence, which LLM output is prone to); an object reply is used
/// directly. Anything else, including a string that fails to parse,
/// yields the low-confidence fallback.
pub fn normalize_reply(reply: &Value) -> NormalizedAnalysis {
    match reply {
        Value::Object(fields) => from_fields(fields),
        Value::String(raw) => match serde_json::from_str::<Value>(strip_code_fence(raw)) {
            Ok(Value::Object(fields)) => from_fields(&fields),
            Ok(_) => {
                debug!("narrative reply parsed to a non-object value");
                parse_fallback()
            }
            Err(err) => {
                debug!(error = %err, "narrative reply is not valid JSON");
                parse_fallback()
            }
        },
        _ => {
            debug!("narrative reply is neither string nor object");
            parse_fallback()
        }
    }
}

/// Normalize the minimal `{ "report": ... }` response shape
///
/// The preformatted report becomes the narrative verbatim; there is no
/// confidence label in this shape, so it stays at the `Medium` default.
pub fn normalize_report(report: &str) -> NormalizedAnalysis {
    NormalizedAnalysis {
        analysis_text: report.to_string(),
        ..NormalizedAnalysis::default()
    }
}

fn parse_fallback() -> NormalizedAnalysis {
    NormalizedAnalysis {
        analysis_text: PARSE_FALLBACK_TEXT.to_string(),
        confidence: Confidence::Low,
        ..NormalizedAnalysis::default()
    }
}

fn from_fields(fields: &Map<String, Value>) -> NormalizedAnalysis {
    NormalizedAnalysis {
        analysis_text: fields
            .get("analysis")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        confidence: Confidence::from_label(fields.get("confidence").and_then(Value::as_str)),
        sentiment_summary: narrative(fields, "sentiment_summary"),
        prediction_summary: narrative(fields, "prediction_summary"),
        risk_factors: narrative(fields, "risk_factors"),
        disclaimer: narrative(fields, "disclaimer"),
    }
}

/// Extract an optional narrative field, treating empty text as absent
///
/// The model occasionally emits a list where a sentence was asked for
/// (risk factors in particular); a list of strings joins into one line.
fn narrative(fields: &Map<String, Value>, key: &str) -> Option<String> {
    let text = match fields.get(key)? {
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("; "),
        _ => return None,
    };
    if text.is_empty() { None } else { Some(text) }
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}
