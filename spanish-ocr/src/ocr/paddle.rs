//! PaddleOCR backend.
//!
//! Runs PP-OCRv5 detection, angle classification and Latin recognition models
//! through `paddle-ocr-rs` (ONNX Runtime). Model files are looked up in
//! `OCR_MODEL_DIR`; both the RapidOCR and the PaddleX naming schemes are accepted.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use paddle_ocr_rs::ocr_lite::OcrLite;
use tracing::debug;

use crate::error::{OcrServiceError, Result};
use crate::models::ModelVariant;

use super::engine::{
    Detection, EngineFactory, EngineProfile, OcrEngine, OcrVersion, RecognitionOutput,
    RecognitionScript,
};

const PADDING: u32 = 50;
const BOX_SCORE_THRESH: f32 = 0.5;
const BOX_THRESH: f32 = 0.3;
const UNCLIP_RATIO: f32 = 1.6;

const CLS_MODEL_ALIASES: &[&str] = &[
    "ch_ppocr_mobile_v2.0_cls_infer.onnx",
    "ch_ppocr_mobile_v2.0_cls_mobile.onnx",
];

const LATIN_DICT_ALIASES: &[&str] = &["ppocrv5_latin_dict.txt", "latin_dict.txt"];

fn det_model_aliases(variant: ModelVariant) -> &'static [&'static str] {
    match variant {
        ModelVariant::Mobile => &[
            "PP-OCRv5_mobile_det.onnx",
            "ch_PP-OCRv5_mobile_det.onnx",
            "ch_PP-OCRv5_det_mobile.onnx",
        ],
        ModelVariant::Server => &[
            "PP-OCRv5_server_det.onnx",
            "ch_PP-OCRv5_server_det.onnx",
            "ch_PP-OCRv5_det_server.onnx",
        ],
    }
}

fn rec_model_aliases(variant: ModelVariant) -> &'static [&'static str] {
    match variant {
        ModelVariant::Mobile => &[
            "latin_PP-OCRv5_mobile_rec.onnx",
            "latin_PP-OCRv5_rec_mobile_infer.onnx",
            "latin_PP-OCRv5_rec_mobile.onnx",
        ],
        ModelVariant::Server => &[
            "latin_PP-OCRv5_server_rec.onnx",
            "latin_PP-OCRv5_rec_server_infer.onnx",
            "latin_PP-OCRv5_rec_server.onnx",
        ],
    }
}

fn find_existing_file(dir: &Path, aliases: &[&str]) -> Option<PathBuf> {
    aliases
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

fn require_file(dir: &Path, aliases: &[&str], role: &str) -> Result<String> {
    find_existing_file(dir, aliases)
        .map(|path| path.to_string_lossy().to_string())
        .ok_or_else(|| {
            OcrServiceError::Engine(format!(
                "{role} model not found in {}; expected one of: {}",
                dir.display(),
                aliases.join(", ")
            ))
        })
}

/// Builds [`OcrLite`] engines from PP-OCRv5 ONNX models.
pub struct PaddleEngineFactory;

impl EngineFactory for PaddleEngineFactory {
    fn name(&self) -> &'static str {
        "paddle"
    }

    fn build(&self, profile: &EngineProfile) -> Result<Box<dyn OcrEngine>> {
        // Only PP-OCRv5 Latin models are shipped for this service.
        debug_assert_eq!(profile.script, RecognitionScript::Latin);
        debug_assert_eq!(profile.version, OcrVersion::PpOcrV5);

        let dir = profile.model_dir.as_path();
        let det = require_file(dir, det_model_aliases(profile.variant), "Detection")?;
        let cls = require_file(dir, CLS_MODEL_ALIASES, "Classification")?;
        let rec = require_file(dir, rec_model_aliases(profile.variant), "Recognition")?;

        let mut ocr = OcrLite::new();
        match find_existing_file(dir, LATIN_DICT_ALIASES) {
            Some(dict) => {
                let dict = dict.to_string_lossy().to_string();
                ocr.init_models_with_dict(&det, &cls, &rec, &dict, profile.num_threads)
                    .map_err(|e| {
                        OcrServiceError::Engine(format!("Failed to init PaddleOCR: {e}"))
                    })?;
            }
            None => {
                ocr.init_models(&det, &cls, &rec, profile.num_threads)
                    .map_err(|e| {
                        OcrServiceError::Engine(format!("Failed to init PaddleOCR: {e}"))
                    })?;
            }
        }

        Ok(Box::new(PaddleEngine {
            ocr,
            text_score_threshold: profile.text_score_threshold,
            use_cls: profile.use_cls,
            max_side_len: profile.max_side_len,
        }))
    }
}

struct PaddleEngine {
    ocr: OcrLite,
    text_score_threshold: f32,
    use_cls: bool,
    max_side_len: u32,
}

impl OcrEngine for PaddleEngine {
    fn recognize(&mut self, image: &DynamicImage) -> Result<RecognitionOutput> {
        let rgb = image.to_rgb8();

        let result = self
            .ocr
            .detect(
                &rgb,
                PADDING,
                self.max_side_len,
                BOX_SCORE_THRESH,
                BOX_THRESH,
                UNCLIP_RATIO,
                self.use_cls,
                false,
            )
            .map_err(|e| OcrServiceError::Engine(format!("PaddleOCR detection failed: {e}")))?;

        let total = result.text_blocks.len();
        let detections: Vec<Detection> = result
            .text_blocks
            .into_iter()
            .filter(|block| block.text_score >= self.text_score_threshold)
            .filter(|block| !block.text.trim().is_empty())
            .map(|block| Detection {
                geometry: block
                    .box_points
                    .iter()
                    .map(|p| (p.x as f32, p.y as f32))
                    .collect(),
                text: block.text.trim().to_string(),
                confidence: block.text_score,
            })
            .collect();

        debug!(
            kept = detections.len(),
            dropped = total - detections.len(),
            threshold = self.text_score_threshold,
            "PaddleOCR page recognized"
        );

        Ok(RecognitionOutput::Detections(detections))
    }
}
