//! Liveness probe and backend availability

use actix_web::{HttpResponse, Responder, get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::BackendHealth;
use crate::service::AnalysisClient;

#[derive(Serialize, ToSchema)]
pub struct LivenessStatus {
    pub status: String,
    pub version: String,
}

/// Liveness probe endpoint
///
/// Always returns 200 OK if the service is running, regardless of backend state.
#[utoipa::path(
    get,
    path = "/health/live",
    responses(
        (status = 200, description = "Service is alive", body = LivenessStatus)
    ),
    tag = "health"
)]
#[get("/health/live")]
pub async fn liveness() -> impl Responder {
    HttpResponse::Ok().json(LivenessStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Analysis backend availability
///
/// Always 200; the `status` field carries online / degraded / offline.
#[utoipa::path(
    get,
    path = "/v1/backend/health",
    responses(
        (status = 200, description = "Backend availability", body = BackendHealth)
    ),
    tag = "health"
)]
#[get("/v1/backend/health")]
pub async fn backend_health(client: web::Data<AnalysisClient>) -> impl Responder {
    HttpResponse::Ok().json(client.check_health().await)
}

/// Configure health check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(liveness).service(backend_health);
}
