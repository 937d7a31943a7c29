//! `POST /ocr`: multipart upload in, recognized text out.

use axum::body::Bytes;
use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::{error, info};

use crate::api::dto::{ErrorDetail, OcrQuery, OcrResponse, OcrUpload};
use crate::api::{AppQuery, AppState};
use crate::error::{OcrServiceError, Result};

struct Upload {
    bytes: Bytes,
    file_name: Option<String>,
}

/// Pull the `file` field out of the form, enforcing the size ceiling.
async fn read_upload(
    mut multipart: Multipart,
    max_bytes: usize,
    max_mb: usize,
) -> Result<Upload> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Err(OcrServiceError::MissingFile),
            Err(e) => {
                return Err(if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    OcrServiceError::FileTooLarge { max_mb }
                } else {
                    OcrServiceError::BadRequest(format!(
                        "Invalid multipart body: {}",
                        e.body_text()
                    ))
                });
            }
        };

        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                OcrServiceError::FileTooLarge { max_mb }
            } else {
                OcrServiceError::BadRequest(format!("Failed to read file: {}", e.body_text()))
            }
        })?;

        if bytes.len() > max_bytes {
            return Err(OcrServiceError::FileTooLarge { max_mb });
        }

        return Ok(Upload { bytes, file_name });
    }
}

/// `POST /ocr`
///
/// Extract text from an image or PDF. PDF pages are recognized in order and
/// pages without text are left out of the result.
#[utoipa::path(
    post,
    path = "/ocr",
    tag = "ocr",
    params(OcrQuery),
    request_body(content = OcrUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Recognized text", body = OcrResponse),
        (status = 400, description = "Malformed multipart body", body = ErrorDetail),
        (status = 413, description = "File exceeds MAX_FILE_SIZE_MB", body = ErrorDetail),
        (status = 422, description = "Invalid model_type or missing file", body = ErrorDetail),
        (status = 500, description = "Decode or OCR engine failure", body = ErrorDetail),
    )
)]
pub async fn ocr_document(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<OcrQuery>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<OcrResponse>> {
    let multipart = multipart.map_err(|e| {
        OcrServiceError::BadRequest(format!("Invalid multipart body: {}", e.body_text()))
    })?;

    let upload_config = &state.config.upload;
    let upload = read_upload(
        multipart,
        upload_config.max_file_size_bytes(),
        upload_config.max_file_size_mb,
    )
    .await?;

    let variant = query.model_type;
    let size = upload.bytes.len();

    let text = state
        .pipeline
        .process(upload.bytes, upload.file_name.as_deref(), variant)
        .await
        .map_err(|e| {
            error!(
                file_name = upload.file_name.as_deref().unwrap_or("<none>"),
                variant = %variant,
                "Error processing file: {}",
                e
            );
            e
        })?;

    info!(
        file_name = upload.file_name.as_deref().unwrap_or("<none>"),
        variant = %variant,
        size,
        chars = text.chars().count(),
        "OCR request completed"
    );

    Ok(Json(OcrResponse {
        text,
        model_type: variant,
        file_name: upload.file_name,
    }))
}
