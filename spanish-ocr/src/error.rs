use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrServiceError {
    #[error("Invalid model_type: {0}")]
    InvalidModelType(String),

    #[error("File too large. Maximum size is {max_mb}MB")]
    FileTooLarge { max_mb: usize },

    #[error("Missing required multipart field 'file'")]
    MissingFile,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("OCR engine error: {0}")]
    Engine(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl OcrServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidModelType(_) | Self::MissingFile => StatusCode::UNPROCESSABLE_ENTITY,
            Self::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Decode(_) | Self::Engine(_) | Self::Internal(_) | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message placed in the `detail` field of the error body.
    pub fn detail(&self) -> String {
        match self {
            Self::InvalidModelType(msg) | Self::BadRequest(msg) => msg.clone(),
            Self::FileTooLarge { .. } | Self::MissingFile => self.to_string(),
            Self::Decode(msg) | Self::Engine(msg) | Self::Internal(msg) => {
                format!("Error processing file: {msg}")
            }
            Self::Io(e) => format!("Error processing file: {e}"),
        }
    }
}

impl IntoResponse for OcrServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "detail": self.detail() }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, OcrServiceError>;
