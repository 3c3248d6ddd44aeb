//! qpdf FFI wrapper for unlocking encrypted PDFs
//!
//! qpdf owns the cryptography: it opens a document with an optional
//! password and rewrites it without encryption so the text layer can be
//! parsed by a plain PDF reader.

use crate::error::{Error, PasswordIssue, Result};
use qpdf::QPdf;
use std::borrow::Cow;

/// Wrapper for qpdf operations via FFI
pub struct QpdfWrapper;

/// Helper: open a QPdf from memory, optionally with password
fn open_qpdf(data: &[u8], password: Option<&str>) -> Result<QPdf> {
    let opened = match password {
        Some(pwd) => QPdf::read_from_memory_encrypted(data, pwd),
        None => QPdf::read_from_memory(data),
    };
    opened.map_err(|e| map_qpdf_error(e, password.is_some()))
}

/// Map qpdf crate errors to our error types
fn map_qpdf_error(e: qpdf::QPdfError, password_supplied: bool) -> Error {
    match e.error_code() {
        qpdf::QPdfErrorCode::InvalidPassword => Error::PasswordRequired {
            issue: if password_supplied {
                PasswordIssue::Incorrect
            } else {
                PasswordIssue::Missing
            },
        },
        _ => Error::corrupt(e),
    }
}

impl QpdfWrapper {
    /// Produce an unencrypted view of a PDF.
    ///
    /// # Arguments
    /// * `input_data` - Raw PDF bytes
    /// * `password` - Password for encrypted PDFs; ignored for plain ones
    ///
    /// # Returns
    /// The input unchanged when the document is not encrypted, otherwise
    /// the document rewritten by qpdf with encryption removed.
    pub fn unlock<'a>(input_data: &'a [u8], password: Option<&str>) -> Result<Cow<'a, [u8]>> {
        let qpdf = open_qpdf(input_data, password)?;

        if !qpdf.is_encrypted() {
            return Ok(Cow::Borrowed(input_data));
        }

        tracing::debug!("Document is encrypted, rewriting without encryption");

        let mut writer = qpdf.writer();
        writer.preserve_encryption(false);
        writer
            .write_to_memory()
            .map(Cow::Owned)
            .map_err(|e| map_qpdf_error(e, password.is_some()))
    }

    /// Check whether a PDF is encrypted without supplying a password.
    ///
    /// Documents with an empty user password open without one and still
    /// report `true`.
    pub fn is_encrypted(input_data: &[u8]) -> Result<bool> {
        match open_qpdf(input_data, None) {
            Ok(qpdf) => Ok(qpdf.is_encrypted()),
            Err(Error::PasswordRequired { .. }) => Ok(true),
            Err(e) => Err(e),
        }
    }

    /// Get the page count of a PDF
    ///
    /// # Arguments
    /// * `input_data` - Raw PDF bytes
    /// * `password` - Optional password for encrypted PDFs
    pub fn get_page_count(input_data: &[u8], password: Option<&str>) -> Result<u32> {
        let qpdf = open_qpdf(input_data, password)?;
        qpdf.get_num_pages()
            .map_err(|e| map_qpdf_error(e, password.is_some()))
    }
}
