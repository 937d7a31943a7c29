use std::path::PathBuf;

use image::DynamicImage;

use crate::config::OcrConfig;
use crate::error::{OcrServiceError, Result};
use crate::models::ModelVariant;

/// Script the recognizer is trained for. Spanish is covered by the Latin models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognitionScript {
    Latin,
}

/// PP-OCR model generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OcrVersion {
    PpOcrV5,
}

/// Fixed configuration an engine is built with.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineProfile {
    pub variant: ModelVariant,
    pub script: RecognitionScript,
    pub version: OcrVersion,
    /// Detections scoring below this are dropped by the engine.
    pub text_score_threshold: f32,
    pub use_cls: bool,
    pub num_threads: usize,
    pub max_side_len: u32,
    pub model_dir: PathBuf,
}

impl EngineProfile {
    pub fn new(variant: ModelVariant, config: &OcrConfig) -> Self {
        Self {
            variant,
            script: RecognitionScript::Latin,
            version: OcrVersion::PpOcrV5,
            text_score_threshold: config.text_score_threshold,
            use_cls: config.use_cls,
            num_threads: config.num_threads.max(1),
            max_side_len: config.max_side_len,
            model_dir: config.model_dir.clone(),
        }
    }
}

/// One recognized region as reported by detection-style engines.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Polygon corners in image pixel coordinates.
    pub geometry: Vec<(f32, f32)>,
    pub text: String,
    pub confidence: f32,
}

/// Raw engine output. Engines either hand back plain text lines or full
/// detections; [`normalize_output`](super::normalize_output) flattens both.
#[derive(Debug, Clone, PartialEq)]
pub enum RecognitionOutput {
    Lines(Vec<String>),
    Detections(Vec<Detection>),
}

/// A loaded recognizer. Calls are blocking and take `&mut self`, so callers
/// serialize access per instance.
pub trait OcrEngine: Send {
    fn recognize(&mut self, image: &DynamicImage) -> Result<RecognitionOutput>;
}

/// Builds engines for the registry. Building may load model weights and is
/// run on the blocking pool.
pub trait EngineFactory: Send + Sync {
    fn name(&self) -> &'static str;

    fn build(&self, profile: &EngineProfile) -> Result<Box<dyn OcrEngine>>;
}

/// Factory that never produces an engine.
pub struct UnavailableEngineFactory {
    reason: String,
}

impl UnavailableEngineFactory {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl EngineFactory for UnavailableEngineFactory {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    fn build(&self, profile: &EngineProfile) -> Result<Box<dyn OcrEngine>> {
        Err(OcrServiceError::Engine(format!(
            "OCR engine '{}' unavailable: {}",
            profile.variant, self.reason
        )))
    }
}
