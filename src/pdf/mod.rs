//! PDF processing layer
//!
//! This module opens PDFs with qpdf (decryption) and lopdf (text layer),
//! and decodes them into a single text string.

mod decoder;
mod qpdf;
mod reader;

pub use decoder::{ExtractedDocument, PdfDecoder, DEFAULT_PAGE_SEPARATOR};
pub use qpdf::QpdfWrapper;
pub use reader::PdfReader;
