//! PDF Reader MCP Server Library
//!
//! This crate provides a single MCP tool:
//! - `unlock_pdf`: Read the full text of a PDF, decrypting it with a password when needed
//!
//! Text larger than the inline limit is written to a temporary file and
//! the tool returns its path instead.

pub mod error;
pub mod output;
pub mod pdf;
pub mod server;

pub use error::{Error, PasswordIssue, Result};
pub use output::{OutputPayload, OutputRouter};
pub use pdf::{ExtractedDocument, PdfDecoder};
pub use server::{run_server, run_server_with_config, PdfServer, ServerConfig, UnlockPdfParams};
