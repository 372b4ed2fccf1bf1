use actix_web::HttpResponse;
use serde::Serialize;

pub const SERVICE_NAME: &str = "Veridoc API";

/// Liveness only; the stores are not probed
#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub success: bool,
    pub status: String,
    pub service: String,
    pub version: String,
    /// RFC 3339, UTC
    pub timestamp: String,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Process is up and serving requests", body = HealthResponse)
    )
)]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        success: true,
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
