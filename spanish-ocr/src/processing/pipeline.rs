use std::sync::Arc;

use axum::body::Bytes;
use image::DynamicImage;
use tracing::debug;

use crate::error::{OcrServiceError, Result};
use crate::models::{DocumentKind, ModelVariant};
use crate::ocr::OcrInvoker;

use super::classifier::{classify, detect_mime};
use super::pages::decode_image;
use super::rasterizer::Rasterizer;

/// Join per-page texts with a blank line between pages.
pub fn join_pages(page_texts: &[String]) -> String {
    page_texts.join("\n\n")
}

/// Payload to text: classify, split into pages, recognize each page in order.
#[derive(Clone)]
pub struct OcrPipeline {
    invoker: OcrInvoker,
    rasterizer: Arc<dyn Rasterizer>,
}

impl OcrPipeline {
    pub fn new(invoker: OcrInvoker, rasterizer: Arc<dyn Rasterizer>) -> Self {
        Self {
            invoker,
            rasterizer,
        }
    }

    pub async fn process(
        &self,
        bytes: Bytes,
        file_name: Option<&str>,
        variant: ModelVariant,
    ) -> Result<String> {
        let kind = classify(&bytes, file_name);
        debug!(
            kind = kind.as_str(),
            mime = detect_mime(&bytes),
            size = bytes.len(),
            "Classified upload"
        );

        match kind {
            DocumentKind::Pdf => self.process_pdf(bytes, variant).await,
            DocumentKind::Image => {
                let page = self.decode(bytes).await?;
                self.invoker.recognize(page, variant).await
            }
        }
    }

    async fn process_pdf(&self, bytes: Bytes, variant: ModelVariant) -> Result<String> {
        let pages = self.rasterize(bytes).await?;
        let page_count = pages.len();

        let mut page_texts = Vec::with_capacity(page_count);
        for (index, page) in pages.into_iter().enumerate() {
            let text = self.invoker.recognize(page, variant).await?;
            debug!(
                page = index + 1,
                pages = page_count,
                chars = text.chars().count(),
                "Page recognized"
            );
            if !text.is_empty() {
                page_texts.push(text);
            }
        }

        Ok(join_pages(&page_texts))
    }

    async fn rasterize(&self, bytes: Bytes) -> Result<Vec<DynamicImage>> {
        let rasterizer = Arc::clone(&self.rasterizer);
        tokio::task::spawn_blocking(move || rasterizer.rasterize(&bytes))
            .await
            .map_err(|e| OcrServiceError::Internal(format!("Rasterize task panicked: {e}")))?
    }

    async fn decode(&self, bytes: Bytes) -> Result<DynamicImage> {
        tokio::task::spawn_blocking(move || decode_image(&bytes))
            .await
            .map_err(|e| OcrServiceError::Internal(format!("Decode task panicked: {e}")))?
    }
}
