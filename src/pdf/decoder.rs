//! Decode a PDF file into a single text string

use crate::error::{Error, Result};
use crate::pdf::PdfReader;
use std::path::Path;

/// Page separator used when none is configured (form feed, the plain-text page break)
pub const DEFAULT_PAGE_SEPARATOR: &str = "\x0c";

/// Text extracted from one PDF, owned by the request that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDocument {
    /// Page texts joined with the page separator
    pub text: String,
    /// Total number of pages in the document
    pub page_count: u32,
    /// Pages whose text is in `text` (1-indexed, in output order)
    pub extracted_pages: Vec<u32>,
}

/// Opens PDFs (decrypting when needed) and concatenates their page text
#[derive(Debug, Clone)]
pub struct PdfDecoder {
    page_separator: String,
}

impl Default for PdfDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SEPARATOR)
    }
}

impl PdfDecoder {
    pub fn new(page_separator: impl Into<String>) -> Self {
        Self {
            page_separator: page_separator.into(),
        }
    }

    pub fn page_separator(&self) -> &str {
        &self.page_separator
    }

    /// Decode every page of the PDF at `path`.
    ///
    /// An empty password is treated as no password.
    pub fn decode<P: AsRef<Path>>(
        &self,
        path: P,
        password: Option<&str>,
    ) -> Result<ExtractedDocument> {
        self.decode_pages(path, password, None)
    }

    /// Decode selected pages (1-indexed, caller order) or all pages when
    /// `pages` is `None` or empty.
    pub fn decode_pages<P: AsRef<Path>>(
        &self,
        path: P,
        password: Option<&str>,
        pages: Option<&[u32]>,
    ) -> Result<ExtractedDocument> {
        let path = path.as_ref();
        let password = password.filter(|p| !p.is_empty());

        tracing::debug!(
            path = %path.display(),
            with_password = password.is_some(),
            "Decoding PDF"
        );

        let reader = PdfReader::open(path, password)?;
        let page_count = reader.page_count();

        let selected: Vec<u32> = match pages {
            Some(pages) if !pages.is_empty() => {
                if let Some(&page) = pages.iter().find(|&&p| p == 0 || p > page_count) {
                    return Err(Error::PageOutOfBounds {
                        page,
                        total: page_count,
                    });
                }
                pages.to_vec()
            }
            _ => (1..=page_count).collect(),
        };

        let texts = selected
            .iter()
            .map(|&page| reader.extract_page_text(page))
            .collect::<Result<Vec<_>>>()?;
        let text = texts.join(&self.page_separator);

        tracing::info!(
            path = %path.display(),
            pages = selected.len(),
            bytes = text.len(),
            "Decoded PDF"
        );

        Ok(ExtractedDocument {
            text,
            page_count,
            extracted_pages: selected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_separator_is_form_feed() {
        assert_eq!(PdfDecoder::default().page_separator(), "\x0c");
        assert_eq!(PdfDecoder::new("\n").page_separator(), "\n");
    }

    #[test]
    fn test_decode_missing_file_fails_before_parsing() {
        let decoder = PdfDecoder::default();
        let result = decoder.decode("/definitely/not/here.pdf", Some("secret"));
        assert!(matches!(result, Err(Error::FileNotFound { .. })));
    }

    #[test]
    fn test_decode_non_pdf_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.pdf");
        std::fs::write(&path, "just some notes").unwrap();

        let result = PdfDecoder::default().decode(&path, None);
        assert!(matches!(result, Err(Error::CorruptDocument { .. })));
    }
}
