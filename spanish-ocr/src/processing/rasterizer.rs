use std::path::{Path, PathBuf};
use std::process::Command;

use image::DynamicImage;
use tempfile::TempDir;
use tracing::debug;

use crate::error::{OcrServiceError, Result};

use super::pages::decode_image;

/// Turns PDF bytes into one image per page, in document order.
pub trait Rasterizer: Send + Sync {
    fn rasterize(&self, pdf: &[u8]) -> Result<Vec<DynamicImage>>;
}

/// Rasterizes with poppler's `pdftoppm`, rendering PNGs into a temp dir.
pub struct PdftoppmRasterizer {
    binary: PathBuf,
    dpi: u32,
}

impl PdftoppmRasterizer {
    pub fn new(dpi: u32) -> Self {
        Self {
            binary: PathBuf::from("pdftoppm"),
            dpi,
        }
    }

    pub fn with_binary(binary: impl Into<PathBuf>, dpi: u32) -> Self {
        Self {
            binary: binary.into(),
            dpi,
        }
    }

    fn render(&self, input: &Path, output_prefix: &Path) -> Result<()> {
        let output = Command::new(&self.binary)
            .args(["-png", "-r", &self.dpi.to_string()])
            .arg(input)
            .arg(output_prefix)
            .output();

        match output {
            Ok(out) if out.status.success() => Ok(()),
            Ok(out) => {
                let stderr = String::from_utf8_lossy(&out.stderr);
                Err(OcrServiceError::Decode(format!(
                    "Unable to rasterize PDF: {}",
                    stderr.trim()
                )))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(OcrServiceError::Decode(
                format!("{} not found (install poppler-utils)", self.binary.display()),
            )),
            Err(e) => Err(OcrServiceError::Io(e)),
        }
    }
}

/// Page number encoded in a `pdftoppm` output name such as `page-07.png`.
fn page_number(file_name: &str) -> Option<u32> {
    file_name
        .strip_prefix("page-")?
        .strip_suffix(".png")?
        .parse()
        .ok()
}

/// Rendered page files in `dir`, sorted by page number.
fn rendered_pages(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut pages: Vec<(u32, PathBuf)> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name();
            let number = page_number(name.to_str()?)?;
            Some((number, entry.path()))
        })
        .collect();

    pages.sort_by_key(|(number, _)| *number);
    Ok(pages.into_iter().map(|(_, path)| path).collect())
}

impl Rasterizer for PdftoppmRasterizer {
    fn rasterize(&self, pdf: &[u8]) -> Result<Vec<DynamicImage>> {
        let temp_dir = TempDir::new()?;
        let input = temp_dir.path().join("input.pdf");
        std::fs::write(&input, pdf)?;

        self.render(&input, &temp_dir.path().join("page"))?;

        let paths = rendered_pages(temp_dir.path())?;
        if paths.is_empty() {
            return Err(OcrServiceError::Decode(
                "PDF produced no pages".to_string(),
            ));
        }
        debug!(pages = paths.len(), dpi = self.dpi, "PDF rasterized");

        paths
            .iter()
            .map(|path| decode_image(&std::fs::read(path)?))
            .collect()
    }
}
