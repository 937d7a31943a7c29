use std::sync::Arc;

use crate::config::Config;
use crate::ocr::{EngineFactory, EngineRegistry, OcrInvoker};
use crate::processing::{OcrPipeline, Rasterizer};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pipeline: OcrPipeline,
}

impl AppState {
    pub fn new(
        config: Config,
        engine_factory: Arc<dyn EngineFactory>,
        rasterizer: Arc<dyn Rasterizer>,
    ) -> Self {
        let config = Arc::new(config);
        let registry = Arc::new(EngineRegistry::new(engine_factory, &config.ocr));
        let invoker = OcrInvoker::new(registry);
        let pipeline = OcrPipeline::new(invoker, rasterizer);

        Self { config, pipeline }
    }
}
