mod classifier;
mod pages;
mod pipeline;
mod rasterizer;

pub use classifier::{classify, detect_mime, file_extension, PDF_MAGIC};
pub use pages::decode_image;
pub use pipeline::{join_pages, OcrPipeline};
pub use rasterizer::{PdftoppmRasterizer, Rasterizer};
