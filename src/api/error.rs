//! Unified API error handling
//!
//! Every failure is turned into a JSON notice; nothing here ends the process.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::service::AnalysisError;

/// Standard error response format
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Unique request ID for tracing
    pub request_id: String,
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Blank claim or ingestion text (400)
    #[error("Input must not be empty")]
    EmptyInput,

    /// Backend could not be reached in time (503)
    #[error("Analysis backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Backend answered with a non-success status (502)
    #[error("Analysis backend returned status {status}: {body}")]
    BackendError { status: u16, body: String },

    /// Backend answered 2xx with an unreadable body (502)
    #[error("Analysis backend sent a malformed response: {0}")]
    MalformedResponse(String),
}

impl ApiError {
    fn error_type(&self) -> &'static str {
        match self {
            ApiError::EmptyInput => "empty_input",
            ApiError::BackendUnavailable(_) => "backend_unavailable",
            ApiError::BackendError { .. } => "backend_error",
            ApiError::MalformedResponse(_) => "malformed_response",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::EmptyInput => StatusCode::BAD_REQUEST,
            ApiError::BackendUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::BackendError { .. } | ApiError::MalformedResponse(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_type = self.error_type();

        if status.is_server_error() {
            tracing::error!(
                error_type = error_type,
                status = status.as_u16(),
                message = %self,
                "API error"
            );
        } else {
            tracing::debug!(error_type = error_type, message = %self, "Rejected request");
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            request_id: Uuid::new_v4().to_string(),
        })
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::EmptyInput => ApiError::EmptyInput,
            AnalysisError::BackendUnavailable(msg) => ApiError::BackendUnavailable(msg),
            AnalysisError::BackendError { status, body } => ApiError::BackendError { status, body },
            AnalysisError::MalformedResponse(msg) => ApiError::MalformedResponse(msg),
        }
    }
}
