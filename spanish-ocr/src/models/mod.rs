mod document;
mod variant;

pub use document::*;
pub use variant::*;
