use crate::models::DocumentKind;

/// Leading bytes of every PDF file.
pub const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// Decide whether a payload is rasterized as a PDF or decoded as an image.
///
/// Magic bytes win over the client-supplied filename. Only when they don't
/// match is the filename extension consulted; anything but `pdf` is an image.
pub fn classify(bytes: &[u8], file_name: Option<&str>) -> DocumentKind {
    if bytes.starts_with(PDF_MAGIC) {
        return DocumentKind::Pdf;
    }

    match file_name.and_then(file_extension) {
        Some(ext) if ext == "pdf" => DocumentKind::Pdf,
        _ => DocumentKind::Image,
    }
}

/// Lowercased suffix after the last `.`, if any.
pub fn file_extension(file_name: &str) -> Option<String> {
    let (_, ext) = file_name.rsplit_once('.')?;
    Some(ext.to_lowercase())
}

/// MIME type sniffed from content, for logging only.
pub fn detect_mime(bytes: &[u8]) -> &'static str {
    infer::get(bytes)
        .map(|kind| kind.mime_type())
        .unwrap_or("application/octet-stream")
}
