//! HTTP transport seam for the analysis backend

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::payload::{AnalysisRequestBody, AnalysisResponse};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Transport used by the request controller to reach the backend
///
/// The controller only needs "issue the analysis request, give me a
/// decoded response or a transport error". Abstracting that behind a
/// trait keeps the state machine testable without a network and lets any
/// conforming HTTP client sit underneath.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalysisTransport: Send + Sync {
    /// Issue the analysis request and decode the response body
    async fn fetch_analysis(&self, body: &AnalysisRequestBody) -> Result<AnalysisResponse>;

    /// Probe the backend liveness endpoint
    async fn health(&self) -> Result<bool>;
}

/// reqwest-backed transport
pub struct HttpTransport {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpTransport {
    /// Create a transport, validating the configuration
    ///
    /// The configured timeout applies to every request, so a hung backend
    /// resolves as a transport error rather than waiting forever.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    /// Get the active configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl AnalysisTransport for HttpTransport {
    #[instrument(skip(self, body), fields(ticker = %body.ticker, horizon = body.horizon_days))]
    async fn fetch_analysis(&self, body: &AnalysisRequestBody) -> Result<AnalysisResponse> {
        let url = self.config.analysis_url();
        debug!("posting analysis request to {url}");

        let response = self.client.post(&url).json(body).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::UnexpectedStatus(response.status()));
        }

        let raw = response.text().await?;
        Ok(serde_json::from_str(&raw)?)
    }

    async fn health(&self) -> Result<bool> {
        let response = self.client.get(self.config.health_url()).send().await?;
        Ok(response.status().is_success())
    }
}
