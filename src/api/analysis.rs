//! REST API endpoints for claim analysis, session history and ingestion

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::model::{EvidenceProfile, IngestAck};
use crate::service::{AnalysisClient, HistoryEntry, SessionStore};

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionCreated {
    pub session_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitClaimRequest {
    pub claim: String,
    /// Falls back to the configured default profile
    #[serde(default)]
    pub profile: Option<EvidenceProfile>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionHistoryResponse {
    pub session_id: Uuid,
    /// Oldest first
    pub entries: Vec<HistoryEntry>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct IngestTextRequest {
    pub text: String,
    #[serde(default)]
    pub source: Option<String>,
}

/// Start a new dashboard session
#[utoipa::path(
    post,
    path = "/v1/sessions",
    responses(
        (status = 201, description = "Session created", body = SessionCreated)
    ),
    tag = "sessions"
)]
#[post("/v1/sessions")]
pub async fn create_session(store: web::Data<SessionStore>) -> HttpResponse {
    let session_id = store.create().await;
    HttpResponse::Created().json(SessionCreated { session_id })
}

/// Analyze a claim and record it in the session history
#[utoipa::path(
    post,
    path = "/v1/sessions/{session_id}/analyses",
    params(
        ("session_id" = Uuid, Path, description = "Session ID")
    ),
    request_body = SubmitClaimRequest,
    responses(
        (status = 200, description = "Claim analyzed", body = HistoryEntry),
        (status = 400, description = "Claim is empty", body = crate::api::error::ErrorResponse),
        (status = 502, description = "Backend error or malformed response", body = crate::api::error::ErrorResponse),
        (status = 503, description = "Backend unavailable", body = crate::api::error::ErrorResponse)
    ),
    tag = "analysis"
)]
#[post("/v1/sessions/{session_id}/analyses")]
pub async fn submit_claim(
    client: web::Data<AnalysisClient>,
    store: web::Data<SessionStore>,
    path: web::Path<Uuid>,
    body: web::Json<SubmitClaimRequest>,
) -> Result<HttpResponse, ApiError> {
    let session_id = path.into_inner();
    let session = store.session(session_id).await;

    let entry = client
        .submit_claim(&session, &body.claim, body.profile)
        .await?;

    tracing::debug!(
        session_id = %session_id,
        score = entry.result.score,
        history_len = session.len().await,
        "Analysis recorded"
    );
    Ok(HttpResponse::Ok().json(entry))
}

/// List the analyses of a session in submission order
///
/// Unknown sessions read as empty and are not created.
#[utoipa::path(
    get,
    path = "/v1/sessions/{session_id}/analyses",
    params(
        ("session_id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Session history", body = SessionHistoryResponse)
    ),
    tag = "sessions"
)]
#[get("/v1/sessions/{session_id}/analyses")]
pub async fn list_analyses(store: web::Data<SessionStore>, path: web::Path<Uuid>) -> HttpResponse {
    let session_id = path.into_inner();
    let entries = match store.get(session_id).await {
        Some(session) => session.entries().await,
        None => Vec::new(),
    };

    HttpResponse::Ok().json(SessionHistoryResponse {
        session_id,
        entries,
    })
}

/// Forward text to the backend's knowledge store (best effort)
#[utoipa::path(
    post,
    path = "/v1/ingest",
    request_body = IngestTextRequest,
    responses(
        (status = 200, description = "Ingestion attempted; see status", body = IngestAck),
        (status = 400, description = "Text is empty", body = crate::api::error::ErrorResponse)
    ),
    tag = "ingestion"
)]
#[post("/v1/ingest")]
pub async fn ingest(
    client: web::Data<AnalysisClient>,
    body: web::Json<IngestTextRequest>,
) -> Result<HttpResponse, ApiError> {
    let ack = client
        .submit_ingestion(&body.text, body.source.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(ack))
}

/// Configure analysis routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_session)
        .service(submit_claim)
        .service(list_analyses)
        .service(ingest);
}
