//! Error types for PDF Reader MCP Server

use std::fmt;
use thiserror::Error;

/// Result type alias for PDF Reader MCP Server
pub type Result<T> = std::result::Result<T, Error>;

/// Why an encrypted PDF could not be opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordIssue {
    /// The document is encrypted and no password was supplied
    Missing,
    /// A password was supplied but the document rejected it
    Incorrect,
}

impl fmt::Display for PasswordIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordIssue::Missing => f.write_str("PDF is password protected"),
            PasswordIssue::Incorrect => f.write_str("Incorrect password"),
        }
    }
}

/// Error types for PDF Reader MCP Server
#[derive(Error, Debug)]
pub enum Error {
    /// PDF file does not exist or cannot be read
    #[error("PDF not found: {path}")]
    FileNotFound { path: String },

    /// PDF is encrypted and no usable password was supplied
    #[error("{issue}")]
    PasswordRequired { issue: PasswordIssue },

    /// Not a PDF, or parsing failed for a reason other than encryption
    #[error("Corrupt PDF document: {reason}")]
    CorruptDocument { reason: String },

    /// Spilled output could not be written
    #[error("Failed to write extracted text to {path}: {source}")]
    SpillWriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Requested page is outside the document
    #[error("Page {page} out of bounds (total: {total})")]
    PageOutOfBounds { page: u32, total: u32 },

    /// Extraction task did not complete
    #[error("Internal error: {reason}")]
    Internal { reason: String },
}

impl Error {
    pub(crate) fn corrupt(reason: impl fmt::Display) -> Self {
        Error::CorruptDocument {
            reason: reason.to_string(),
        }
    }

    /// Return a sanitized error message safe to send to clients.
    /// Internal details (library errors, spill paths) are omitted.
    /// Full details should be logged via tracing before calling this.
    pub fn client_message(&self) -> String {
        match self {
            Error::FileNotFound { path } => format!("PDF not found: {}", path),
            Error::PasswordRequired {
                issue: PasswordIssue::Missing,
            } => "PDF is password protected; supply the password and try again".to_string(),
            Error::PasswordRequired {
                issue: PasswordIssue::Incorrect,
            } => "Incorrect password for this PDF".to_string(),
            Error::CorruptDocument { .. } => "Invalid or corrupt PDF file".to_string(),
            Error::SpillWriteFailed { .. } => {
                "Text too large to return inline and could not be written to a temporary file"
                    .to_string()
            }
            Error::PageOutOfBounds { page, total } => {
                format!("Page {} out of bounds (total: {})", page, total)
            }
            Error::Internal { .. } => "PDF processing error".to_string(),
        }
    }

    /// Whether the caller should retry with a (different) password
    pub fn is_password_error(&self) -> bool {
        matches!(self, Error::PasswordRequired { .. })
    }
}
