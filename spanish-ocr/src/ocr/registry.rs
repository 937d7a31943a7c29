use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{Mutex, OnceCell};
use tracing::{info, warn};

use crate::config::OcrConfig;
use crate::error::{OcrServiceError, Result};
use crate::models::ModelVariant;

use super::engine::{EngineFactory, EngineProfile, OcrEngine};

/// Shared, lock-guarded engine. Recognition takes `&mut self`, so one call
/// runs per engine at a time.
pub type EngineHandle = Arc<Mutex<Box<dyn OcrEngine>>>;

/// Process-wide cache of engines, one slot per [`ModelVariant`].
///
/// A slot is filled on first use. Concurrent first requests for the same
/// variant wait on the slot instead of building their own engine. A failed
/// build leaves the slot empty; the error goes back to the caller that tried.
pub struct EngineRegistry {
    factory: Arc<dyn EngineFactory>,
    config: OcrConfig,
    slots: [OnceCell<EngineHandle>; 2],
}

impl EngineRegistry {
    pub fn new(factory: Arc<dyn EngineFactory>, config: &OcrConfig) -> Self {
        Self {
            factory,
            config: config.clone(),
            slots: [OnceCell::new(), OnceCell::new()],
        }
    }

    pub async fn get_engine(&self, variant: ModelVariant) -> Result<EngineHandle> {
        let slot = &self.slots[variant.index()];
        let handle = slot.get_or_try_init(|| self.build_engine(variant)).await?;
        Ok(Arc::clone(handle))
    }

    #[cfg(test)]
    fn is_loaded(&self, variant: ModelVariant) -> bool {
        self.slots[variant.index()].initialized()
    }

    async fn build_engine(&self, variant: ModelVariant) -> Result<EngineHandle> {
        let profile = EngineProfile::new(variant, &self.config);
        let factory = Arc::clone(&self.factory);

        info!(
            variant = %variant,
            backend = factory.name(),
            model_dir = %profile.model_dir.display(),
            "Building OCR engine"
        );
        let started = Instant::now();

        let built = tokio::task::spawn_blocking(move || factory.build(&profile))
            .await
            .map_err(|e| OcrServiceError::Internal(format!("Engine build task panicked: {e}")))?;

        match built {
            Ok(engine) => {
                info!(
                    variant = %variant,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "OCR engine ready"
                );
                Ok(Arc::new(Mutex::new(engine)))
            }
            Err(e) => {
                warn!(variant = %variant, "OCR engine build failed: {}", e);
                Err(e)
            }
        }
    }
}
