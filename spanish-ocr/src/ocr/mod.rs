//! OCR (Optical Character Recognition) Module
//!
//! Text recognition is delegated to an [`OcrEngine`]. Engines are expensive to
//! build (model weights are loaded from disk), so the [`EngineRegistry`] builds
//! at most one per [`ModelVariant`](crate::models::ModelVariant) and keeps it for
//! the life of the process.
//!
//! # Architecture
//!
//! - `OcrEngine` / `EngineFactory` traits define the engine seam
//! - `PaddleEngineFactory` runs PP-OCRv5 models through `paddle-ocr-rs`
//!   (enabled by the `paddle` feature)
//! - `UnavailableEngineFactory` reports why no engine can be built
//! - `OcrInvoker` turns one page image into text
//!
//! # Usage
//!
//! ```rust,ignore
//! let registry = Arc::new(EngineRegistry::new(factory, &config.ocr));
//! let invoker = OcrInvoker::new(registry);
//! let text = invoker.recognize(page, ModelVariant::Mobile).await?;
//! ```

mod engine;
mod invoker;
#[cfg(feature = "paddle")]
mod paddle;
mod registry;

pub use engine::{
    Detection, EngineFactory, EngineProfile, OcrEngine, OcrVersion, RecognitionOutput,
    RecognitionScript, UnavailableEngineFactory,
};
pub use invoker::{normalize_output, OcrInvoker};
#[cfg(feature = "paddle")]
pub use paddle::PaddleEngineFactory;
pub use registry::{EngineHandle, EngineRegistry};

use std::sync::Arc;

use crate::config::OcrConfig;

/// Factory used by the binary: PaddleOCR when compiled in, otherwise one that
/// explains why recognition is unavailable.
pub fn default_engine_factory(config: &OcrConfig) -> Arc<dyn EngineFactory> {
    #[cfg(feature = "paddle")]
    {
        tracing::info!(
            model_dir = %config.model_dir.display(),
            use_cls = config.use_cls,
            threads = config.num_threads,
            "Using PaddleOCR PP-OCRv5 Latin models"
        );
        Arc::new(PaddleEngineFactory)
    }

    #[cfg(not(feature = "paddle"))]
    {
        Arc::new(UnavailableEngineFactory::new(format!(
            "built without the `paddle` feature; no OCR engine for models in {:?}",
            config.model_dir
        )))
    }
}
