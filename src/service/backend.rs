//! Analysis backend transport
//!
//! Each call issues exactly one HTTP request with a fixed timeout. There are
//! no retries; a failure is reported to the caller immediately.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;

use crate::model::{AnalysisRequest, AnalysisResponse, BackendConfig, BackendInfo, IngestRequest};

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BackendError {
    /// Connection refused, DNS failure, timeout, or the body could not be read
    #[error("Backend unreachable: {0}")]
    Unavailable(String),

    #[error("Backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Success status but the body is not the expected JSON
    #[error("Malformed backend response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BackendError::Malformed(err.to_string())
        } else {
            BackendError::Unavailable(err.to_string())
        }
    }
}

/// Result of probing the backend root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    pub status: u16,
    pub info: BackendInfo,
}

/// Remote service that performs claim analysis and ingestion
#[async_trait]
pub trait CredibilityBackend: Send + Sync {
    /// `POST /analyze`
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, BackendError>;

    /// `POST /ingest`
    async fn ingest(&self, request: &IngestRequest) -> Result<(), BackendError>;

    /// `GET /`; any received response is `Ok`, whatever its status
    async fn probe(&self) -> Result<Probe, BackendError>;

    /// Base address, for display
    fn base_url(&self) -> &str;
}

/// reqwest-backed implementation of [`CredibilityBackend`]
pub struct HttpBackend {
    client: Client,
    config: BackendConfig,
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .build()
            .map_err(|e| BackendError::Unavailable(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(client, config))
    }

    /// Use a preconfigured reqwest client (proxies, TLS roots, ...)
    pub fn with_client(client: Client, mut config: BackendConfig) -> Self {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Self { client, config }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path)
    }

    /// Read the body of a non-success response into a `Status` error
    async fn status_error(response: Response) -> BackendError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        BackendError::Status { status, body }
    }
}

#[async_trait]
impl CredibilityBackend for HttpBackend {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, BackendError> {
        let url = self.endpoint("analyze");

        tracing::debug!(url = %url, profile = %request.profile(), "Submitting claim for analysis");

        let response = self
            .client
            .post(&url)
            .json(request)
            .timeout(self.config.analyze_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let body = response.text().await?;
        let value: Value = serde_json::from_str(&body)
            .map_err(|e| BackendError::Malformed(format!("Response is not JSON: {}", e)))?;

        if !value.is_object() {
            return Err(BackendError::Malformed(
                "Response is not a JSON object".to_string(),
            ));
        }

        serde_json::from_value(value)
            .map_err(|e| BackendError::Malformed(format!("Failed to read response: {}", e)))
    }

    async fn ingest(&self, request: &IngestRequest) -> Result<(), BackendError> {
        let url = self.endpoint("ingest");

        tracing::debug!(url = %url, source = %request.source(), "Submitting text for ingestion");

        let response = self
            .client
            .post(&url)
            .json(request)
            .timeout(self.config.analyze_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        Ok(())
    }

    async fn probe(&self) -> Result<Probe, BackendError> {
        let url = self.endpoint("");

        let response = self
            .client
            .get(&url)
            .timeout(self.config.health_timeout)
            .send()
            .await?;

        let status = response.status();
        let info = if status == StatusCode::OK {
            // Metadata is optional; a non-JSON or non-object body still counts as a response
            response
                .json::<BackendInfo>()
                .await
                .unwrap_or_default()
        } else {
            BackendInfo::default()
        };

        Ok(Probe {
            status: status.as_u16(),
            info,
        })
    }

    fn base_url(&self) -> &str {
        &self.config.base_url
    }
}
