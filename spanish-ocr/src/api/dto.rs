//! Request and response bodies for the HTTP API.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::ModelVariant;

/// Query parameters of `POST /ocr`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OcrQuery {
    /// Model size: `mobile` (faster, smaller) or `server` (more accurate).
    #[serde(default)]
    #[param(inline)]
    pub model_type: ModelVariant,
}

/// Multipart body of `POST /ocr`.
#[derive(Debug, ToSchema)]
pub struct OcrUpload {
    /// Image file (jpg, png, ...) or PDF file.
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OcrResponse {
    /// Recognized text. Lines are separated by `\n`, PDF pages by `\n\n`.
    pub text: String,
    pub model_type: ModelVariant,
    /// Filename as sent by the client, if any.
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    pub detail: String,
}
