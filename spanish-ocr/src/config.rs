use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::models::ModelVariant;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.trim().parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub ocr: OcrConfig,
    pub upload: UploadConfig,
    pub pdf: PdfConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Settings shared by every engine the registry builds.
#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    /// Variant reported at startup. Requests pick their own variant.
    pub default_model_type: ModelVariant,
    pub text_score_threshold: f32,
    pub model_dir: PathBuf,
    /// Text-direction classification stage.
    pub use_cls: bool,
    pub num_threads: usize,
    pub max_side_len: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    pub max_file_size_mb: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PdfConfig {
    pub dpi: u32,
}

impl UploadConfig {
    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb.saturating_mul(1024 * 1024)
    }

    /// Ceiling for the whole request body. Leaves room for multipart framing
    /// so oversized files are rejected by the handler with a readable message.
    pub fn body_limit_bytes(&self) -> usize {
        self.max_file_size_bytes().saturating_add(1024 * 1024)
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            default_model_type: ModelVariant::Mobile,
            text_score_threshold: 0.5,
            model_dir: PathBuf::from("./models"),
            use_cls: true,
            num_threads: 4,
            max_side_len: 1024,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let defaults = OcrConfig::default();
        Self {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("PORT", 5000),
            },
            ocr: OcrConfig {
                default_model_type: parse_env_or("MODEL_TYPE", defaults.default_model_type),
                text_score_threshold: parse_env_or(
                    "TEXT_SCORE_THRESHOLD",
                    defaults.text_score_threshold,
                ),
                model_dir: env::var("OCR_MODEL_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.model_dir),
                use_cls: parse_env_or("OCR_USE_CLS", defaults.use_cls),
                num_threads: parse_env_or("OCR_NUM_THREADS", defaults.num_threads),
                max_side_len: parse_env_or("OCR_MAX_SIDE_LEN", defaults.max_side_len),
            },
            upload: UploadConfig {
                max_file_size_mb: parse_env_or("MAX_FILE_SIZE_MB", 10),
            },
            pdf: PdfConfig {
                dpi: parse_env_or("PDF_DPI", 200),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
