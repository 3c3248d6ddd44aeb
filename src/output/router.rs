//! Inline-or-spill routing of extracted text

use crate::error::{Error, Result};
use crate::pdf::ExtractedDocument;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Largest text (in bytes) returned inline by default
pub const DEFAULT_INLINE_MAX_BYTES: usize = 50 * 1024;

/// Final response payload for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputPayload {
    /// Text returned verbatim
    Inline { text: String },
    /// Text written to a file the caller reads afterwards
    SpilledToFile { path: PathBuf, byte_size: u64 },
}

impl OutputPayload {
    /// Text sent back to the client: the document text, or a notice
    /// pointing at the spilled file.
    pub fn into_response_text(self) -> String {
        match self {
            OutputPayload::Inline { text } => text,
            OutputPayload::SpilledToFile { path, byte_size } => format!(
                "Text too large; written to: {} ({} bytes)",
                path.display(),
                byte_size
            ),
        }
    }
}

/// Decides whether extracted text fits inline or must be spilled to disk
#[derive(Debug, Clone)]
pub struct OutputRouter {
    inline_max_bytes: usize,
    spill_dir: PathBuf,
}

impl OutputRouter {
    pub fn new(inline_max_bytes: usize, spill_dir: impl Into<PathBuf>) -> Self {
        Self {
            inline_max_bytes,
            spill_dir: spill_dir.into(),
        }
    }

    pub fn inline_max_bytes(&self) -> usize {
        self.inline_max_bytes
    }

    pub fn spill_dir(&self) -> &Path {
        &self.spill_dir
    }

    /// Route a decoded document.
    ///
    /// Text up to and including `inline_max_bytes` is returned inline.
    /// Anything larger is written in full to a new file; a write failure
    /// is an error, never truncated inline text.
    pub fn route(&self, document: ExtractedDocument) -> Result<OutputPayload> {
        let byte_size = document.text.len();

        if byte_size <= self.inline_max_bytes {
            return Ok(OutputPayload::Inline {
                text: document.text,
            });
        }

        let path = self.spill(&document.text)?;

        tracing::info!(
            path = %path.display(),
            bytes = byte_size,
            limit = self.inline_max_bytes,
            "Text exceeds inline limit, spilled to file"
        );

        Ok(OutputPayload::SpilledToFile {
            path,
            byte_size: byte_size as u64,
        })
    }

    /// Write `text` to a uniquely named `.txt` file in the spill directory.
    ///
    /// The text goes to a hidden staging file first and is renamed into
    /// place once fully written, so the final name never holds partial text.
    fn spill(&self, text: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.spill_dir).map_err(|e| spill_error(&self.spill_dir, e))?;

        let final_path = self
            .spill_dir
            .join(format!("extract-{}.txt", uuid::Uuid::new_v4()));

        let mut staging = tempfile::Builder::new()
            .prefix(".extract-")
            .suffix(".partial")
            .tempfile_in(&self.spill_dir)
            .map_err(|e| spill_error(&self.spill_dir, e))?;

        staging
            .write_all(text.as_bytes())
            .and_then(|_| staging.as_file().sync_all())
            .map_err(|e| spill_error(staging.path(), e))?;

        // Dropping `staging` on any error above removes the partial file.
        staging
            .persist_noclobber(&final_path)
            .map_err(|e| spill_error(&final_path, e.error))?;

        Ok(final_path)
    }
}

fn spill_error(path: &Path, source: std::io::Error) -> Error {
    Error::SpillWriteFailed {
        path: path.display().to_string(),
        source,
    }
}
