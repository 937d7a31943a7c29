use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::{handlers, openapi, AppState};

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = state.config.upload.body_limit_bytes();

    let ocr_routes = Router::new()
        .route("/ocr", post(handlers::ocr_document))
        // Enforced while the multipart stream is read, after the query is validated.
        .layer(DefaultBodyLimit::max(body_limit));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(openapi::openapi_json))
        .merge(openapi::redoc_router())
        .merge(ocr_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
