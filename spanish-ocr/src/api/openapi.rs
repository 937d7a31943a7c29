use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Spanish OCR API",
        version = "1.0.0",
        description = "OCR service for Spanish text using PaddleOCR PP-OCRv5 models.",
    ),
    paths(handlers::health::health_check, handlers::ocr::ocr_document),
    components(schemas(
        crate::models::ModelVariant,
        dto::OcrUpload,
        dto::OcrResponse,
        dto::HealthResponse,
        dto::ErrorDetail,
    )),
    tags(
        (name = "health", description = "Liveness check"),
        (name = "ocr", description = "Text extraction from images and PDFs"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
