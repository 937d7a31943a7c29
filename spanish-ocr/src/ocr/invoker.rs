use std::sync::Arc;

use image::DynamicImage;

use crate::error::{OcrServiceError, Result};
use crate::models::ModelVariant;

use super::engine::RecognitionOutput;
use super::registry::EngineRegistry;

/// Flatten either engine output shape into recognized strings, keeping the
/// engine's reading order.
pub fn normalize_output(output: RecognitionOutput) -> Vec<String> {
    match output {
        RecognitionOutput::Lines(lines) => lines,
        RecognitionOutput::Detections(detections) => {
            detections.into_iter().map(|d| d.text).collect()
        }
    }
}

/// Runs one page image through the engine for a variant.
#[derive(Clone)]
pub struct OcrInvoker {
    registry: Arc<EngineRegistry>,
}

impl OcrInvoker {
    pub fn new(registry: Arc<EngineRegistry>) -> Self {
        Self { registry }
    }

    /// Recognized lines joined with `\n`. A page with nothing recognized
    /// yields an empty string.
    pub async fn recognize(&self, page: DynamicImage, variant: ModelVariant) -> Result<String> {
        let engine = self.registry.get_engine(variant).await?;

        let output = tokio::task::spawn_blocking(move || {
            let mut engine = engine.blocking_lock();
            engine.recognize(&page)
        })
        .await
        .map_err(|e| OcrServiceError::Engine(format!("OCR task panicked: {e}")))??;

        Ok(normalize_output(output).join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OcrConfig;
    use crate::ocr::{Detection, EngineFactory, EngineProfile, OcrEngine};

    struct FixedEngine(RecognitionOutput);

    impl OcrEngine for FixedEngine {
        fn recognize(&mut self, _image: &DynamicImage) -> Result<RecognitionOutput> {
            Ok(self.0.clone())
        }
    }

    struct FixedFactory(RecognitionOutput);

    impl EngineFactory for FixedFactory {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn build(&self, _profile: &EngineProfile) -> Result<Box<dyn OcrEngine>> {
            Ok(Box::new(FixedEngine(self.0.clone())))
        }
    }

    struct FailingEngine;

    impl OcrEngine for FailingEngine {
        fn recognize(&mut self, _image: &DynamicImage) -> Result<RecognitionOutput> {
            Err(OcrServiceError::Engine("inference failed".to_string()))
        }
    }

    struct FailingFactory;

    impl EngineFactory for FailingFactory {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn build(&self, _profile: &EngineProfile) -> Result<Box<dyn OcrEngine>> {
            Ok(Box::new(FailingEngine))
        }
    }

    fn invoker(factory: impl EngineFactory + 'static) -> OcrInvoker {
        let registry = EngineRegistry::new(Arc::new(factory), &OcrConfig::default());
        OcrInvoker::new(Arc::new(registry))
    }

    fn detection(text: &str, confidence: f32) -> Detection {
        Detection {
            geometry: vec![(0.0, 0.0), (10.0, 0.0), (10.0, 5.0), (0.0, 5.0)],
            text: text.to_string(),
            confidence,
        }
    }

    #[test]
    fn test_normalize_lines_keeps_order() {
        let output = RecognitionOutput::Lines(vec!["uno".into(), "dos".into()]);
        assert_eq!(normalize_output(output), vec!["uno", "dos"]);
    }

    #[test]
    fn test_normalize_detections_takes_text_in_order() {
        let output = RecognitionOutput::Detections(vec![
            detection("Hola", 0.9),
            detection("Mundo", 0.6),
        ]);
        assert_eq!(normalize_output(output), vec!["Hola", "Mundo"]);
    }

    #[tokio::test]
    async fn test_recognize_joins_lines_with_newline() {
        let invoker = invoker(FixedFactory(RecognitionOutput::Detections(vec![
            detection("Primera línea", 0.95),
            detection("Segunda línea", 0.91),
        ])));

        let text = invoker
            .recognize(DynamicImage::new_rgb8(32, 32), ModelVariant::Mobile)
            .await
            .unwrap();

        assert_eq!(text, "Primera línea\nSegunda línea");
    }

    #[tokio::test]
    async fn test_single_detection_has_no_line_break() {
        let invoker = invoker(FixedFactory(RecognitionOutput::Lines(vec![
            "HOLA MUNDO".into()
        ])));

        let text = invoker
            .recognize(DynamicImage::new_rgb8(32, 32), ModelVariant::Server)
            .await
            .unwrap();

        assert_eq!(text, "HOLA MUNDO");
        assert!(!text.contains('\n'));
    }

    #[tokio::test]
    async fn test_no_detections_is_empty_string() {
        let invoker = invoker(FixedFactory(RecognitionOutput::Detections(vec![])));

        let text = invoker
            .recognize(DynamicImage::new_rgb8(32, 32), ModelVariant::Mobile)
            .await
            .unwrap();

        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn test_engine_failure_propagates() {
        let invoker = invoker(FailingFactory);

        let result = invoker
            .recognize(DynamicImage::new_rgb8(32, 32), ModelVariant::Mobile)
            .await;

        assert!(matches!(result, Err(OcrServiceError::Engine(_))));
    }
}
