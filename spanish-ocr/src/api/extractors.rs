use axum::extract::rejection::QueryRejection;
use axum::extract::FromRequestParts;

use crate::error::OcrServiceError;

/// `Query` whose rejection is reported as an [`OcrServiceError`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(OcrServiceError))]
pub struct AppQuery<T>(pub T);

impl From<QueryRejection> for OcrServiceError {
    fn from(rejection: QueryRejection) -> Self {
        map_query_rejection(rejection)
    }
}

fn map_query_rejection(rejection: QueryRejection) -> OcrServiceError {
    match rejection {
        // `model_type` is the only query parameter, so any deserialize failure is a bad variant.
        QueryRejection::FailedToDeserializeQueryString(err) => {
            tracing::debug!("Rejected query string: {}", err.body_text());
            OcrServiceError::InvalidModelType("model_type must match ^(mobile|server)$".to_string())
        }
        _ => OcrServiceError::BadRequest(rejection.body_text()),
    }
}
