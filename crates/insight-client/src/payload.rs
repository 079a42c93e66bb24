//! Wire types for the analysis endpoint

use insight_core::de;
use insight_core::report::{Fundamentals, Prediction, Sentiment, Source};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body POSTed to the analysis endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequestBody {
    pub ticker: String,
    pub horizon_days: u32,
    /// Effective query text: the user's question, or the templated default
    pub user_input: String,
}

/// Response body as received, before normalization
///
/// The backend has two endpoint variants with different shapes; both
/// decode here and normalize into the same view-model downstream.
/// `Report` is tried first: the rich shape defaults every field, so it
/// would otherwise swallow any object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AnalysisResponse {
    /// Minimal shape produced by the report variant
    Report(ReportPayload),
    /// Rich shape produced by the chat variant
    Rich(AnalysisPayload),
}

/// Minimal response shape: a single preformatted report string
#[derive(Debug, Clone, Deserialize)]
pub struct ReportPayload {
    pub report: String,
}

/// Rich response shape: narrative reply plus structured sections
///
/// Every section is optional; `reply` itself may be a JSON-encoded string
/// or an already-structured object, which is why it stays a raw [`Value`]
/// until normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisPayload {
    #[serde(default)]
    pub reply: Value,
    #[serde(default)]
    pub fundamentals: Option<Fundamentals>,
    #[serde(default)]
    pub sentiment: Option<Sentiment>,
    #[serde(default)]
    pub prediction: Option<Prediction>,
    #[serde(default)]
    pub chart_data: Vec<RawChartPoint>,
    #[serde(default)]
    pub sources: Vec<Source>,
}

/// One chart record as received, before validation
///
/// Numeric fields decode leniently: a malformed value becomes absent, not
/// zero, so the adapter can preserve the gap-vs-value distinction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawChartPoint {
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "de::lenient_f64")]
    pub upper: Option<f64>,
    #[serde(default, deserialize_with = "de::lenient_f64")]
    pub lower: Option<f64>,
}
