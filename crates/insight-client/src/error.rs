//! Error types for the analysis client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors produced while requesting an analysis
///
/// Narrative-parse irregularities are deliberately NOT represented here:
/// the normalizer absorbs them into a degraded view-model instead of
/// failing the request.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Submitted without a ticker symbol
    #[error("ticker required")]
    TickerRequired,

    /// Network or HTTP transport failure
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("unexpected status {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    /// Response body did not decode as a known payload shape
    #[error("malformed response body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    /// Invalid client configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Whether this failure is surfaced to the user as a connection problem
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::UnexpectedStatus(_) | Self::MalformedBody(_)
        )
    }
}
