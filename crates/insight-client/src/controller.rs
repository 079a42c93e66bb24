//! Request lifecycle state machine for analysis submissions
//!
//! The controller owns all user input and the single lifecycle state;
//! everything else only reads. Transitions happen in two reducers:
//! [`RequestController::begin_submit`] validates input and enters
//! `Loading`, [`RequestController::resolve`] leaves it for `Success` or
//! `Error`. [`RequestController::submit`] composes the two around the
//! transport call, so every submission is observed as
//! `Loading -> (Success | Error)` with at most one request in flight.
//!
//! Overlapping requests are unrepresentable here: `begin_submit` refuses
//! while `Loading`, and `submit` takes `&mut self`. A stale response
//! racing a newer submission therefore cannot occur.

use crate::chart;
use crate::error::ClientError;
use crate::normalize;
use crate::payload::{AnalysisRequestBody, AnalysisResponse};
use crate::transport::AnalysisTransport;
use insight_core::report::{Fundamentals, NormalizedAnalysis, Prediction, Sentiment, Source};
use insight_core::series::ChartSeries;
use serde::Serialize;
use tracing::{debug, warn};

/// Smallest horizon the forecast model accepts
pub const MIN_HORIZON_DAYS: u32 = 1;
/// Largest horizon the forecast model accepts
pub const MAX_HORIZON_DAYS: u32 = 30;
/// Horizon used when the user does not pick one
pub const DEFAULT_HORIZON_DAYS: u32 = 7;

/// Message surfaced when submitting without a ticker
pub const MSG_TICKER_REQUIRED: &str = "ticker required";
/// Message surfaced for any transport-class failure
pub const MSG_CONNECTION_FAILED: &str = "connection failed";

/// User input owned by the controller
#[derive(Debug, Clone)]
pub struct RequestInput {
    ticker: String,
    question: String,
    horizon_days: u32,
}

impl Default for RequestInput {
    fn default() -> Self {
        Self {
            ticker: String::new(),
            question: String::new(),
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }
}

impl RequestInput {
    /// Ticker symbol, already trimmed and uppercased
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Free-text question, possibly empty
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Forecast horizon, always within the accepted range
    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }
}

/// Combined view-model handed to presentation on success
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisView {
    pub analysis: NormalizedAnalysis,
    pub series: ChartSeries,
    pub fundamentals: Option<Fundamentals>,
    pub sentiment: Option<Sentiment>,
    pub prediction: Option<Prediction>,
    pub sources: Vec<Source>,
}

impl AnalysisView {
    fn from_response(response: AnalysisResponse) -> Self {
        match response {
            AnalysisResponse::Report(payload) => Self {
                analysis: normalize::normalize_report(&payload.report),
                ..Self::default()
            },
            AnalysisResponse::Rich(payload) => Self {
                analysis: normalize::normalize_reply(&payload.reply),
                series: chart::adapt(&payload.chart_data),
                fundamentals: payload.fundamentals,
                sentiment: payload.sentiment,
                prediction: payload.prediction,
                sources: payload.sources,
            },
        }
    }
}

/// Lifecycle of one analysis request
///
/// Mutated only by the controller's reducers; presentation reads it.
#[derive(Debug, Clone, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success(Box<AnalysisView>),
    Error(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Owner of the request lifecycle and the user input feeding it
pub struct RequestController {
    input: RequestInput,
    state: RequestState,
    transport: Box<dyn AnalysisTransport>,
}

impl RequestController {
    pub fn new(transport: Box<dyn AnalysisTransport>) -> Self {
        Self {
            input: RequestInput::default(),
            state: RequestState::Idle,
            transport,
        }
    }

    pub fn input(&self) -> &RequestInput {
        &self.input
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// Set the ticker, trimming and uppercasing as the backend expects
    pub fn set_ticker(&mut self, value: &str) {
        self.input.ticker = value.trim().to_uppercase();
    }

    /// Set the free-text question; empty means "use the templated default"
    pub fn set_question(&mut self, value: &str) {
        self.input.question = value.to_string();
    }

    /// Set the horizon, clamped into the accepted range
    pub fn set_horizon_days(&mut self, days: u32) {
        self.input.horizon_days = days.clamp(MIN_HORIZON_DAYS, MAX_HORIZON_DAYS);
    }

    /// Parse a horizon entry as typed
    ///
    /// An unparseable entry keeps the prior value; a parseable one clamps
    /// into the accepted range.
    pub fn set_horizon_input(&mut self, raw: &str) {
        match raw.trim().parse::<u32>() {
            Ok(days) => self.set_horizon_days(days),
            Err(_) => debug!(raw, "ignoring unparseable horizon entry"),
        }
    }

    /// Effective query text sent to the backend
    fn effective_query(&self) -> String {
        let question = self.input.question.trim();
        if question.is_empty() {
            format!(
                "Analyze {} stock performance and outlook.",
                self.input.ticker
            )
        } else {
            question.to_string()
        }
    }

    /// Reducer: validate input, enter `Loading`, produce the one request
    ///
    /// Returns `None` without touching the network when a request is
    /// already in flight (the `Loading` state itself is the single
    /// source of truth for that) or when the ticker is empty.
    pub fn begin_submit(&mut self) -> Option<AnalysisRequestBody> {
        if self.state.is_loading() {
            debug!("submit ignored while a request is in flight");
            return None;
        }
        if self.input.ticker.is_empty() {
            debug!("rejecting submission without a ticker");
            self.state = RequestState::Error(MSG_TICKER_REQUIRED.to_string());
            return None;
        }

        let body = AnalysisRequestBody {
            ticker: self.input.ticker.clone(),
            horizon_days: self.input.horizon_days,
            user_input: self.effective_query(),
        };
        self.state = RequestState::Loading;
        Some(body)
    }

    /// Reducer: leave `Loading` for a terminal state
    ///
    /// A decoded response always becomes `Success`; narrative problems
    /// were already absorbed by normalization. Every failure collapses to
    /// the one user-facing connection message, with the cause logged.
    pub fn resolve(&mut self, outcome: Result<AnalysisResponse, ClientError>) {
        self.state = match outcome {
            Ok(response) => RequestState::Success(Box::new(AnalysisView::from_response(response))),
            Err(err) => {
                warn!(error = %err, "analysis request failed");
                RequestState::Error(MSG_CONNECTION_FAILED.to_string())
            }
        };
    }

    /// Submit the current input
    ///
    /// Issues at most one outbound request and always resolves the
    /// lifecycle to `Success` or `Error`; each call starts a fresh
    /// lifecycle independent of prior errors.
    pub async fn submit(&mut self) -> &RequestState {
        if let Some(body) = self.begin_submit() {
            let outcome = self.transport.fetch_analysis(&body).await;
            self.resolve(outcome);
        }
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::PARSE_FALLBACK_TEXT;
    use crate::payload::AnalysisPayload;
    use crate::transport::MockAnalysisTransport;
    use insight_core::Confidence;
    use serde_json::json;

    fn rich_response(reply: serde_json::Value) -> AnalysisResponse {
        AnalysisResponse::Rich(AnalysisPayload {
            reply,
            ..AnalysisPayload::default()
        })
    }

    fn controller_with(mock: MockAnalysisTransport) -> RequestController {
        RequestController::new(Box::new(mock))
    }

    fn idle_controller() -> RequestController {
        controller_with(MockAnalysisTransport::new())
    }

    #[test]
    fn test_submit_passes_through_loading() {
        let mut controller = idle_controller();
        controller.set_ticker("nvda");

        let body = controller.begin_submit().expect("request should be issued");
        assert!(controller.state().is_loading());
        assert_eq!(body.ticker, "NVDA");
        assert_eq!(body.horizon_days, DEFAULT_HORIZON_DAYS);
        assert_eq!(
            body.user_input,
            "Analyze NVDA stock performance and outlook."
        );

        controller.resolve(Ok(rich_response(json!({"analysis": "X"}))));
        assert!(matches!(controller.state(), RequestState::Success(_)));
    }

    #[tokio::test]
    async fn test_empty_ticker_never_issues_request() {
        let mut mock = MockAnalysisTransport::new();
        mock.expect_fetch_analysis().times(0);
        let mut controller = controller_with(mock);

        let state = controller.submit().await;
        match state {
            RequestState::Error(message) => assert_eq!(message, MSG_TICKER_REQUIRED),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_whitespace_ticker_is_empty() {
        let mut controller = idle_controller();
        controller.set_ticker("   ");
        assert!(controller.begin_submit().is_none());
        assert!(matches!(controller.state(), RequestState::Error(_)));
    }

    #[tokio::test]
    async fn test_transport_failure_surfaces_connection_message() {
        let mut mock = MockAnalysisTransport::new();
        mock.expect_fetch_analysis().times(1).returning(|_| {
            Err(ClientError::UnexpectedStatus(
                reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            ))
        });
        let mut controller = controller_with(mock);
        controller.set_ticker("AAPL");

        match controller.submit().await {
            RequestState::Error(message) => assert_eq!(message, MSG_CONNECTION_FAILED),
            other => panic!("expected error state, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_state_is_resubmittable() {
        // The same failure twice in a row still exits Loading both times
        let mut mock = MockAnalysisTransport::new();
        mock.expect_fetch_analysis().times(2).returning(|_| {
            Err(ClientError::UnexpectedStatus(
                reqwest::StatusCode::SERVICE_UNAVAILABLE,
            ))
        });
        let mut controller = controller_with(mock);
        controller.set_ticker("AAPL");

        for _ in 0..2 {
            let state = controller.submit().await;
            assert!(!state.is_loading());
            assert!(matches!(state, RequestState::Error(_)));
        }
    }

    #[test]
    fn test_second_submit_is_noop_while_loading() {
        let mut controller = idle_controller();
        controller.set_ticker("MSFT");

        assert!(controller.begin_submit().is_some());
        assert!(controller.state().is_loading());

        // No second request body, no state change
        assert!(controller.begin_submit().is_none());
        assert!(controller.state().is_loading());
    }

    #[tokio::test]
    async fn test_success_after_error_starts_fresh_lifecycle() {
        let mut mock = MockAnalysisTransport::new();
        let mut attempt = 0;
        mock.expect_fetch_analysis().times(2).returning(move |_| {
            attempt += 1;
            if attempt == 1 {
                Err(ClientError::UnexpectedStatus(
                    reqwest::StatusCode::BAD_GATEWAY,
                ))
            } else {
                Ok(AnalysisResponse::Rich(AnalysisPayload {
                    reply: json!({"analysis": "Recovered.", "confidence": "High"}),
                    ..AnalysisPayload::default()
                }))
            }
        });
        let mut controller = controller_with(mock);
        controller.set_ticker("AAPL");

        assert!(matches!(controller.submit().await, RequestState::Error(_)));
        match controller.submit().await {
            RequestState::Success(view) => {
                assert_eq!(view.analysis.analysis_text, "Recovered.");
                assert_eq!(view.analysis.confidence, Confidence::High);
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_reply_is_absorbed_not_fatal() {
        let mut mock = MockAnalysisTransport::new();
        mock.expect_fetch_analysis()
            .times(1)
            .returning(|_| Ok(rich_response(json!("{not json"))));
        let mut controller = controller_with(mock);
        controller.set_ticker("TSLA");

        match controller.submit().await {
            RequestState::Success(view) => {
                assert_eq!(view.analysis.analysis_text, PARSE_FALLBACK_TEXT);
                assert_eq!(view.analysis.confidence, Confidence::Low);
            }
            other => panic!("narrative trouble must not become an error: {other:?}"),
        }
    }

    #[test]
    fn test_question_used_verbatim_when_present() {
        let mut controller = idle_controller();
        controller.set_ticker("NVDA");
        controller.set_question("How do margins look after the AI chip ramp?");

        let body = controller.begin_submit().expect("request should be issued");
        assert_eq!(body.user_input, "How do margins look after the AI chip ramp?");
    }

    #[test]
    fn test_blank_question_falls_back_to_template() {
        let mut controller = idle_controller();
        controller.set_ticker("NVDA");
        controller.set_question("   ");

        let body = controller.begin_submit().expect("request should be issued");
        assert_eq!(
            body.user_input,
            "Analyze NVDA stock performance and outlook."
        );
    }

    #[test]
    fn test_horizon_input_policy() {
        let mut controller = idle_controller();
        assert_eq!(controller.input().horizon_days(), DEFAULT_HORIZON_DAYS);

        controller.set_horizon_input("14");
        assert_eq!(controller.input().horizon_days(), 14);

        // Unparseable keeps the prior value
        controller.set_horizon_input("fortnight");
        assert_eq!(controller.input().horizon_days(), 14);

        // Out of range clamps
        controller.set_horizon_input("45");
        assert_eq!(controller.input().horizon_days(), MAX_HORIZON_DAYS);
        controller.set_horizon_input("0");
        assert_eq!(controller.input().horizon_days(), MIN_HORIZON_DAYS);
    }

    #[tokio::test]
    async fn test_report_shape_normalizes_to_view() {
        let mut mock = MockAnalysisTransport::new();
        mock.expect_fetch_analysis().times(1).returning(|_| {
            Ok(AnalysisResponse::Report(crate::payload::ReportPayload {
                report: "Preformatted report.".to_string(),
            }))
        });
        let mut controller = controller_with(mock);
        controller.set_ticker("AAPL");

        match controller.submit().await {
            RequestState::Success(view) => {
                assert_eq!(view.analysis.analysis_text, "Preformatted report.");
                assert_eq!(view.analysis.confidence, Confidence::Medium);
                assert!(view.series.is_empty());
                assert!(view.sources.is_empty());
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rich_payload_carries_passthrough_sections() {
        let payload: AnalysisPayload = serde_json::from_value(json!({
            "reply": {"analysis": "Strong quarter.", "confidence": "High"},
            "fundamentals": {"symbol": "NVDA", "pe_ratio": 65.2},
            "prediction": {"forecast_7d": 130.5, "forecast_range_low": 120.0,
                           "forecast_range_high": 141.0},
            "chart_data": [
                {"date": "2024-01-01", "price": 100.0, "upper": 110.0, "lower": 90.0},
                {"date": "2024-01-02"}
            ],
            "sources": [{"title": "Chip demand surges", "url": "https://example.com/a"}]
        }))
        .expect("payload decodes");

        let mut mock = MockAnalysisTransport::new();
        mock.expect_fetch_analysis()
            .times(1)
            .returning(move |_| Ok(AnalysisResponse::Rich(payload.clone())));
        let mut controller = controller_with(mock);
        controller.set_ticker("NVDA");

        match controller.submit().await {
            RequestState::Success(view) => {
                assert_eq!(view.analysis.confidence, Confidence::High);
                assert_eq!(view.series.len(), 2);
                assert!(view.series.points()[1].is_gap());
                assert_eq!(
                    view.fundamentals.as_ref().and_then(|f| f.pe_ratio),
                    Some(65.2)
                );
                assert_eq!(
                    view.prediction.as_ref().and_then(Prediction::forecast_range),
                    Some((120.0, 141.0))
                );
                assert_eq!(view.sources.len(), 1);
            }
            other => panic!("expected success, got {other:?}"),
        }
    }
}
