//! PDF reader: qpdf unlocks, lopdf parses the text layer

use crate::error::{Error, Result};
use crate::pdf::QpdfWrapper;
use lopdf::Document;
use std::path::Path;

/// Open PDF document with its pages indexed in reading order.
///
/// The underlying file is read into memory and closed before parsing
/// starts; the parsed document is released when the reader is dropped.
pub struct PdfReader {
    document: Document,
    /// 1-indexed page numbers, ascending
    pages: Vec<u32>,
}

impl PdfReader {
    /// Open a PDF from a file path
    pub fn open<P: AsRef<Path>>(path: P, password: Option<&str>) -> Result<Self> {
        let path = path.as_ref();

        let data = std::fs::read(path).map_err(|e| {
            tracing::debug!(path = %path.display(), error = %e, "Cannot read PDF");
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        })?;

        Self::open_bytes(&data, password)
    }

    /// Open a PDF from bytes
    pub fn open_bytes(data: &[u8], password: Option<&str>) -> Result<Self> {
        if data.len() < 4 || &data[0..4] != b"%PDF" {
            return Err(Error::corrupt("Not a valid PDF file"));
        }

        let plain = QpdfWrapper::unlock(data, password)?;
        let document = Document::load_mem(&plain).map_err(Error::corrupt)?;
        let pages = document.get_pages().into_keys().collect();

        Ok(Self { document, pages })
    }

    /// Number of pages in the document
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Extract plain text from a single page (1-indexed).
    ///
    /// Trailing line breaks are stripped so callers can join pages with
    /// their own separator.
    pub fn extract_page_text(&self, page: u32) -> Result<String> {
        if page == 0 || page > self.page_count() {
            return Err(Error::PageOutOfBounds {
                page,
                total: self.page_count(),
            });
        }

        let page_number = self.pages[(page - 1) as usize];
        let text = self
            .document
            .extract_text(&[page_number])
            .map_err(|e| Error::corrupt(format!("page {}: {}", page, e)))?;

        Ok(text.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Extract text from every page, in page order
    pub fn extract_all_text(&self) -> Result<Vec<String>> {
        (1..=self.page_count())
            .map(|page| self.extract_page_text(page))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_file() {
        let result = PdfReader::open("/nonexistent/path/to/file.pdf", None);
        assert!(matches!(result, Err(Error::FileNotFound { .. })));
    }

    #[test]
    fn test_open_directory_is_not_readable() {
        let dir = tempfile::tempdir().unwrap();
        let result = PdfReader::open(dir.path(), None);
        assert!(matches!(result, Err(Error::FileNotFound { .. })));
    }

    #[test]
    fn test_open_bytes_rejects_missing_header() {
        let result = PdfReader::open_bytes(b"Hello, not a PDF", None);
        assert!(matches!(result, Err(Error::CorruptDocument { .. })));

        let result = PdfReader::open_bytes(b"%P", None);
        assert!(matches!(result, Err(Error::CorruptDocument { .. })));
    }

    #[test]
    fn test_open_bytes_rejects_truncated_pdf() {
        let result = PdfReader::open_bytes(b"%PDF-1.7\n1 0 obj\n<< /Type", None);
        assert!(matches!(result, Err(Error::CorruptDocument { .. })));
    }
}
