//! Application state and service initialization

use std::sync::Arc;

use actix_web::web;

use crate::model::{Config, ConfigError};
use crate::service::{AnalysisClient, BackendError, HttpBackend, SessionStore};

/// Shared services handed to the Actix-web handlers
pub struct AppState {
    pub client: web::Data<AnalysisClient>,
    pub sessions: web::Data<SessionStore>,
}

impl AppState {
    /// Validate configuration and build the backend client and session store
    pub fn new(config: &Config) -> Result<Self, AppError> {
        config.backend.validate()?;

        let backend = HttpBackend::new(config.backend.clone())?;
        let client = AnalysisClient::new(Arc::new(backend), config.dashboard.clone());

        Ok(Self {
            client: web::Data::new(client),
            sessions: web::Data::new(SessionStore::new()),
        })
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("HTTP client initialization failed: {0}")]
    HttpClient(#[from] BackendError),
}
