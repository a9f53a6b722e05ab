//! Claim analysis client
//!
//! Turns user input into backend requests, normalizes responses and records
//! successful analyses in the caller's session history.

use std::sync::Arc;

use chrono::Utc;

use crate::model::{
    AnalysisRequest, AnalysisResult, BackendHealth, DashboardConfig, EvidenceProfile,
    HealthStatus, IngestAck, IngestRequest,
};
use crate::service::backend::{BackendError, CredibilityBackend};
use crate::service::session::{HistoryEntry, Session};

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AnalysisError {
    /// Rejected before any network call
    #[error("Input is empty")]
    EmptyInput,

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Backend error (status {status}): {body}")]
    BackendError { status: u16, body: String },

    #[error("Malformed backend response: {0}")]
    MalformedResponse(String),
}

impl From<BackendError> for AnalysisError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Unavailable(msg) => AnalysisError::BackendUnavailable(msg),
            BackendError::Status { status, body } => AnalysisError::BackendError { status, body },
            BackendError::Malformed(msg) => AnalysisError::MalformedResponse(msg),
        }
    }
}

pub struct AnalysisClient {
    backend: Arc<dyn CredibilityBackend>,
    defaults: DashboardConfig,
}

impl AnalysisClient {
    pub fn new(backend: Arc<dyn CredibilityBackend>, defaults: DashboardConfig) -> Self {
        Self { backend, defaults }
    }

    pub fn backend_url(&self) -> &str {
        self.backend.base_url()
    }

    /// Analyze a claim and append it to the session's history
    ///
    /// Blank claims fail with [`AnalysisError::EmptyInput`] without contacting
    /// the backend. The history is only modified on success, and the recorded
    /// entry is returned.
    pub async fn submit_claim(
        &self,
        session: &Session,
        claim: &str,
        profile: Option<EvidenceProfile>,
    ) -> Result<HistoryEntry, AnalysisError> {
        let profile = profile.unwrap_or(self.defaults.default_profile);
        let request = AnalysisRequest::new(claim, profile).ok_or(AnalysisError::EmptyInput)?;

        let _turn = session.begin_submission().await;

        let response = self.backend.analyze(&request).await.map_err(|e| {
            tracing::debug!(error = %e, "Claim analysis failed");
            AnalysisError::from(e)
        })?;
        let result = AnalysisResult::from(response);

        tracing::info!(
            score = result.score,
            verdict = %result.verdict,
            sources = result.sources.len(),
            "Claim analyzed"
        );

        let entry = HistoryEntry {
            claim: request.claim().to_string(),
            profile,
            result,
            analyzed_at: Utc::now(),
        };
        session.record(entry.clone()).await;

        Ok(entry)
    }

    /// Forward text to the backend's knowledge store
    ///
    /// Best effort: backend failures become [`IngestAck::Failed`], never an error.
    pub async fn submit_ingestion(
        &self,
        text: &str,
        source: Option<&str>,
    ) -> Result<IngestAck, AnalysisError> {
        let request = IngestRequest::new(text, source, &self.defaults.default_source)
            .ok_or(AnalysisError::EmptyInput)?;

        match self.backend.ingest(&request).await {
            Ok(()) => {
                tracing::info!(source = %request.source(), chars = request.text().len(), "Document ingested");
                Ok(IngestAck::Indexed)
            }
            Err(e) => {
                tracing::warn!(error = %e, source = %request.source(), "Ingestion failed");
                Ok(IngestAck::Failed {
                    notice: e.to_string(),
                })
            }
        }
    }

    /// Query the backend root and classify availability
    pub async fn check_health(&self) -> BackendHealth {
        let backend_url = self.backend.base_url().to_string();

        match self.backend.probe().await {
            Ok(probe) if probe.status == 200 => BackendHealth {
                status: HealthStatus::Online,
                backend_url,
                platform: probe.info.platform,
                files: probe.info.files,
            },
            Ok(probe) => {
                tracing::warn!(status = probe.status, url = %backend_url, "Backend degraded");
                BackendHealth {
                    status: HealthStatus::Degraded,
                    backend_url,
                    platform: None,
                    files: None,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, url = %backend_url, "Backend offline");
                BackendHealth {
                    status: HealthStatus::Offline,
                    backend_url,
                    platform: None,
                    files: None,
                }
            }
        }
    }
}
