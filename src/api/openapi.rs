//! OpenAPI specification endpoints

use actix_web::{HttpResponse, Responder, get};
use utoipa::OpenApi;

use crate::api::{analysis, error, health};
use crate::model::{
    AnalysisResult, BackendHealth, CredibilityBand, EvidenceProfile, HealthStatus, IngestAck,
    SourceRating, SourceRecord,
};
use crate::service::HistoryEntry;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Credibility Console API",
        description = "Claim analysis sessions backed by a remote credibility engine"
    ),
    paths(
        health::liveness,
        health::backend_health,
        analysis::create_session,
        analysis::submit_claim,
        analysis::list_analyses,
        analysis::ingest,
    ),
    components(schemas(
        AnalysisResult,
        BackendHealth,
        CredibilityBand,
        EvidenceProfile,
        HealthStatus,
        HistoryEntry,
        IngestAck,
        SourceRating,
        SourceRecord,
        analysis::SessionCreated,
        analysis::SubmitClaimRequest,
        analysis::SessionHistoryResponse,
        analysis::IngestTextRequest,
        error::ErrorResponse,
        health::LivenessStatus,
    )),
    tags(
        (name = "analysis", description = "Claim analysis"),
        (name = "sessions", description = "Session-scoped analysis history"),
        (name = "ingestion", description = "Best-effort document ingestion"),
        (name = "health", description = "Service and backend health")
    )
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> impl Responder {
    match ApiDoc::openapi().to_yaml() {
        Ok(yaml) => HttpResponse::Ok().content_type("text/yaml").body(yaml),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render OpenAPI YAML");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}
