//! Core view-model types for InsightInvest analysis reports
//!
//! This crate holds the strongly-typed view-model that the rest of the
//! system renders: the normalized narrative report, the coarse confidence
//! classification with its presentation mapping, and the price/forecast
//! time series with explicit gap semantics.
//!
//! Everything here is pure data. The defensive work of producing these
//! types from a loosely-structured backend payload lives in
//! `insight-client`; presentation lives in `insight-cli`. The types are
//! deliberately tolerant on the way in (optional fields, lenient numeric
//! decoding) and precise on the way out (a missing value is `None`, never
//! a coerced zero).

pub mod confidence;
pub mod de;
pub mod report;
pub mod series;

// Re-export main types for convenience
pub use confidence::{Confidence, ConfidenceTone};
pub use report::{FinancialTrends, Fundamentals, NormalizedAnalysis, Prediction, Sentiment, Source};
pub use series::{ChartPoint, ChartSeries};
