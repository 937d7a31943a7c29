use std::io::Cursor;

use image::{DynamicImage, ImageReader};

use crate::error::{OcrServiceError, Result};

/// Decode a raster image payload into a single page.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| OcrServiceError::Decode(format!("Failed to read image: {e}")))?;

    reader
        .decode()
        .map_err(|e| OcrServiceError::Decode(format!("Failed to decode image: {e}")))
}
