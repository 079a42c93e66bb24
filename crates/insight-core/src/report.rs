//! Typed report sections of the analysis view-model

use crate::confidence::Confidence;
use crate::de;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Narrative sections distilled from the backend reply
///
/// Producible from any payload: every field the backend omits or garbles
/// degrades to its default rather than failing the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedAnalysis {
    /// Main narrative text of the analysis
    pub analysis_text: String,
    /// Certainty classification, `Medium` unless the reply says otherwise
    pub confidence: Confidence,
    /// Market-mood summary (bullish/bearish and key drivers)
    pub sentiment_summary: Option<String>,
    /// Description of the quantitative forecast and its confidence interval
    pub prediction_summary: Option<String>,
    /// Key risks called out by the analysis
    pub risk_factors: Option<String>,
    /// Legal/informational disclaimer
    pub disclaimer: Option<String>,
}

/// Company fundamentals passed through from the backend, not re-validated
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fundamentals {
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_f64")]
    pub market_cap: Option<f64>,
    #[serde(default, deserialize_with = "de::lenient_f64")]
    pub pe_ratio: Option<f64>,
    #[serde(default, deserialize_with = "de::lenient_f64")]
    pub eps: Option<f64>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub sector: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub industry: Option<String>,
    #[serde(default)]
    pub financial_trends: Option<FinancialTrends>,
}

/// Quarterly trend block inside [`Fundamentals`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialTrends {
    /// Backend classifies the direction as `"Growing"` or something else
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub trend_direction: Option<String>,
    /// Most-recent-first quarterly revenue figures, preformatted
    #[serde(default)]
    pub recent_quarterly_revenue: Vec<String>,
    /// Most-recent-first quarterly profit margins, preformatted
    #[serde(default)]
    pub recent_profit_margins: Vec<String>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub revenue_growth_last_q: Option<String>,
}

impl FinancialTrends {
    /// Whether the backend classified the trend as growing
    pub fn is_growing(&self) -> bool {
        self.trend_direction.as_deref() == Some("Growing")
    }
}

/// Aggregate news sentiment passed through from the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// Average polarity in `[-1, 1]`
    #[serde(default, deserialize_with = "de::lenient_f64")]
    pub average_sentiment: Option<f64>,
    /// Article counts per sentiment label
    #[serde(default)]
    pub label_distribution: HashMap<String, u32>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub note: Option<String>,
}

/// Quantitative forecast passed through from the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Point forecast at the end of the model horizon
    #[serde(default, deserialize_with = "de::lenient_f64")]
    pub forecast_7d: Option<f64>,
    /// Lower edge of the 90% confidence range
    #[serde(default, deserialize_with = "de::lenient_f64")]
    pub forecast_range_low: Option<f64>,
    /// Upper edge of the 90% confidence range
    #[serde(default, deserialize_with = "de::lenient_f64")]
    pub forecast_range_high: Option<f64>,
    #[serde(default)]
    pub horizon_days: Option<u32>,
    /// Day-by-day forecast path
    #[serde(default)]
    pub predictions: Vec<f64>,
    /// Model identifier reported by the backend
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub method: Option<String>,
}

impl Prediction {
    /// Both edges of the confidence range, when the backend supplied them
    pub fn forecast_range(&self) -> Option<(f64, f64)> {
        Some((self.forecast_range_low?, self.forecast_range_high?))
    }
}

/// A news article the analysis drew on
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    /// Publisher name
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "de::lenient_string")]
    pub published_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_analysis_default_confidence_is_medium() {
        let analysis = NormalizedAnalysis::default();
        assert_eq!(analysis.confidence, Confidence::Medium);
        assert!(analysis.analysis_text.is_empty());
        assert!(analysis.risk_factors.is_none());
    }

    #[test]
    fn test_fundamentals_tolerate_partial_payload() {
        let fundamentals: Fundamentals = serde_json::from_str(
            r#"{"symbol": "NVDA", "pe_ratio": 65.2, "unknown_field": true}"#,
        )
        .unwrap();
        assert_eq!(fundamentals.symbol.as_deref(), Some("NVDA"));
        assert_eq!(fundamentals.pe_ratio, Some(65.2));
        assert!(fundamentals.market_cap.is_none());
    }

    #[test]
    fn test_fundamentals_tolerate_error_payload() {
        // Backend substitutes {"error": "..."} when the ticker lookup fails
        let fundamentals: Fundamentals =
            serde_json::from_str(r#"{"error": "Invalid ticker or no data available."}"#).unwrap();
        assert!(fundamentals.pe_ratio.is_none());
        assert!(fundamentals.financial_trends.is_none());
    }

    #[test]
    fn test_mistyped_numeric_becomes_absent() {
        let fundamentals: Fundamentals =
            serde_json::from_str(r#"{"pe_ratio": "N/A", "market_cap": "3.2T"}"#).unwrap();
        assert_eq!(fundamentals.pe_ratio, None);
        assert_eq!(fundamentals.market_cap, None);
    }

    #[test]
    fn test_trend_direction_classification() {
        let growing = FinancialTrends {
            trend_direction: Some("Growing".to_string()),
            ..Default::default()
        };
        let shrinking = FinancialTrends {
            trend_direction: Some("Declining".to_string()),
            ..Default::default()
        };
        assert!(growing.is_growing());
        assert!(!shrinking.is_growing());
        assert!(!FinancialTrends::default().is_growing());
    }

    #[test]
    fn test_prediction_range_requires_both_edges() {
        let full = Prediction {
            forecast_range_low: Some(90.0),
            forecast_range_high: Some(110.0),
            ..Default::default()
        };
        let half = Prediction {
            forecast_range_low: Some(90.0),
            ..Default::default()
        };
        assert_eq!(full.forecast_range(), Some((90.0, 110.0)));
        assert_eq!(half.forecast_range(), None);
    }

    #[test]
    fn test_source_defaults_for_missing_fields() {
        let source: Source = serde_json::from_str(r#"{"title": "Chip outlook"}"#).unwrap();
        assert_eq!(source.title, "Chip outlook");
        assert!(source.url.is_empty());
        assert!(source.published_at.is_none());
    }
}
