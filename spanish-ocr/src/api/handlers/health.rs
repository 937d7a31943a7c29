use axum::Json;

use crate::api::dto::HealthResponse;

pub const SERVICE_NAME: &str = "spanish-ocr";

/// `GET /health`
///
/// Liveness only; never touches the OCR engines.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse),
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}
