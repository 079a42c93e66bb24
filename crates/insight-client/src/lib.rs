//! Client-side analysis pipeline for the InsightInvest backend
//!
//! This crate owns the only real logic on the client side of the system:
//!
//! - [`controller`]: the request lifecycle state machine
//!   (`Idle -> Loading -> Success | Error`) that drives network
//!   interaction and owns all user input
//! - [`normalize`]: the defensive layer turning the backend's
//!   loosely-structured narrative reply into a typed
//!   [`insight_core::NormalizedAnalysis`], never failing the caller
//! - [`chart`]: adaptation of raw point records into a validated
//!   [`insight_core::ChartSeries`] with explicit gap semantics
//! - [`transport`]: the HTTP seam ([`AnalysisTransport`]) behind which
//!   any conforming client can sit; [`HttpTransport`] is the reqwest one
//!
//! # Example
//!
//! ```rust,ignore
//! use insight_client::{ClientConfig, HttpTransport, RequestController, RequestState};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let transport = HttpTransport::new(ClientConfig::from_env())?;
//!     let mut controller = RequestController::new(Box::new(transport));
//!     controller.set_ticker("nvda");
//!     controller.set_horizon_days(7);
//!
//!     match controller.submit().await {
//!         RequestState::Success(view) => println!("{}", view.analysis.analysis_text),
//!         RequestState::Error(message) => eprintln!("{message}"),
//!         _ => unreachable!("submit always resolves"),
//!     }
//!     Ok(())
//! }
//! ```

pub mod chart;
pub mod config;
pub mod controller;
pub mod error;
pub mod normalize;
pub mod payload;
pub mod transport;

// Re-export main types for convenience
pub use config::ClientConfig;
pub use controller::{AnalysisView, RequestController, RequestState};
pub use error::{ClientError, Result};
pub use payload::{AnalysisRequestBody, AnalysisResponse};
pub use transport::{AnalysisTransport, HttpTransport};
