// Shared fakes and helpers for the HTTP integration tests.
#![allow(dead_code)]

use std::io::Cursor;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

use axum::body::Body;
use axum::http::Request;
use axum::Router;
use image::{DynamicImage, ImageFormat};

use spanish_ocr::api::{create_router, AppState};
use spanish_ocr::config::{Config, OcrConfig, PdfConfig, ServerConfig, UploadConfig};
use spanish_ocr::error::{OcrServiceError, Result};
use spanish_ocr::ocr::{
    Detection, EngineFactory, EngineProfile, OcrEngine, RecognitionOutput,
};
use spanish_ocr::processing::Rasterizer;

pub const BOUNDARY: &str = "spanish-ocr-test-boundary";

static INIT: Once = Once::new();

/// Initialize tracing subscriber once for tests
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Engine whose output is derived from the page width:
/// narrower than 100px reads "HOLA MUNDO", otherwise `Page {width / 100}`.
pub struct FakeEngine {
    calls: Arc<AtomicUsize>,
    blank_pages: Vec<u32>,
}

impl OcrEngine for FakeEngine {
    fn recognize(&mut self, image: &DynamicImage) -> Result<RecognitionOutput> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let page = image.width() / 100;
        if page == 0 {
            return Ok(RecognitionOutput::Lines(vec!["HOLA MUNDO".to_string()]));
        }
        if self.blank_pages.contains(&page) {
            return Ok(RecognitionOutput::Detections(vec![]));
        }
        Ok(RecognitionOutput::Detections(vec![Detection {
            geometry: vec![(0.0, 0.0), (90.0, 0.0), (90.0, 9.0), (0.0, 9.0)],
            text: format!("Page {page}"),
            confidence: 0.98,
        }]))
    }
}

#[derive(Default)]
pub struct FakeEngineFactory {
    pub builds: AtomicUsize,
    pub calls: Arc<AtomicUsize>,
    pub blank_pages: Vec<u32>,
    pub fail_build: bool,
}

impl FakeEngineFactory {
    pub fn with_blank_pages(blank_pages: Vec<u32>) -> Self {
        Self {
            blank_pages,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_build: true,
            ..Default::default()
        }
    }

    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl EngineFactory for FakeEngineFactory {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn build(&self, profile: &EngineProfile) -> Result<Box<dyn OcrEngine>> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        // Model loading is slow; widen the window for concurrent first requests.
        std::thread::sleep(std::time::Duration::from_millis(25));

        if self.fail_build {
            return Err(OcrServiceError::Engine(format!(
                "Detection model not found for {}",
                profile.variant
            )));
        }

        Ok(Box::new(FakeEngine {
            calls: Arc::clone(&self.calls),
            blank_pages: self.blank_pages.clone(),
        }))
    }
}

/// Produces `pages` blank images, page N being `N * 100` pixels wide.
#[derive(Default)]
pub struct FakeRasterizer {
    pub pages: u32,
    pub calls: AtomicUsize,
}

impl FakeRasterizer {
    pub fn with_pages(pages: u32) -> Self {
        Self {
            pages,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Rasterizer for FakeRasterizer {
    fn rasterize(&self, pdf: &[u8]) -> Result<Vec<DynamicImage>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !pdf.starts_with(b"%PDF") {
            return Err(OcrServiceError::Decode(
                "Syntax Error: Couldn't read xref table".to_string(),
            ));
        }
        Ok((1..=self.pages)
            .map(|page| DynamicImage::new_luma8(page * 100, 20))
            .collect())
    }
}

pub fn test_config(max_file_size_mb: usize) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5000,
        },
        ocr: OcrConfig {
            model_dir: PathBuf::from("/nonexistent/models"),
            ..OcrConfig::default()
        },
        upload: UploadConfig { max_file_size_mb },
        pdf: PdfConfig { dpi: 200 },
    }
}

pub fn test_app(factory: Arc<FakeEngineFactory>, rasterizer: Arc<FakeRasterizer>) -> Router {
    init_test_logger();
    create_router(AppState::new(test_config(1), factory, rasterizer))
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut out = Vec::new();
    DynamicImage::new_rgb8(width, height)
        .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .expect("encode png");
    out
}

/// Multipart body with one `file` field.
pub fn multipart_body(field: &str, file_name: Option<&str>, bytes: &[u8]) -> Vec<u8> {
    let disposition = match file_name {
        Some(name) => format!("form-data; name=\"{field}\"; filename=\"{name}\""),
        None => format!("form-data; name=\"{field}\""),
    };

    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(format!("Content-Disposition: {disposition}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn ocr_request(query: &str, body: Vec<u8>) -> Request<Body> {
    let uri = if query.is_empty() {
        "/ocr".to_string()
    } else {
        format!("/ocr?{query}")
    };

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("build request")
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}
