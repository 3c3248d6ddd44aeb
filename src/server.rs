//! MCP Server implementation using rmcp

use crate::error::Error;
use crate::output::{sweep_stale_extracts, OutputPayload, OutputRouter, DEFAULT_INLINE_MAX_BYTES};
use crate::pdf::{PdfDecoder, DEFAULT_PAGE_SEPARATOR};
use anyhow::Result;
use rmcp::{
    handler::server::tool::ToolRouter, handler::server::wrapper::Parameters, model::*,
    schemars::JsonSchema, tool, tool_handler, tool_router, ServerHandler, ServiceExt,
};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

const ENV_INLINE_MAX_BYTES: &str = "PDF_READER_INLINE_MAX_BYTES";
const ENV_SPILL_DIR: &str = "PDF_READER_SPILL_DIR";
const ENV_SPILL_MAX_AGE_HOURS: &str = "PDF_READER_SPILL_MAX_AGE_HOURS";

const INSTRUCTIONS: &str = "The PDF Reader reads PDFs on the local filesystem. \
It supports password-protected and unprotected PDFs. \
Always use an absolute path for file_path when calling unlock_pdf. \
Large documents are written to a temporary text file whose path is returned instead of the text.";

/// Output and extraction configuration for the PDF Reader MCP Server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Largest text in bytes returned inline (default: 50KB)
    pub inline_max_bytes: usize,
    /// Directory receiving spilled text (default: <temp>/pdf_reader_extracts)
    pub spill_dir: PathBuf,
    /// Spilled files older than this are removed at startup (default: 24h)
    pub spill_max_age: Duration,
    /// Inserted between the text of consecutive pages (default: form feed)
    pub page_separator: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            inline_max_bytes: DEFAULT_INLINE_MAX_BYTES,
            spill_dir: std::env::temp_dir().join("pdf_reader_extracts"),
            spill_max_age: Duration::from_secs(24 * 60 * 60),
            page_separator: DEFAULT_PAGE_SEPARATOR.to_string(),
        }
    }
}

impl ServerConfig {
    /// Default configuration overridden by `PDF_READER_*` environment variables
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`; unparsable values are logged and ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_INLINE_MAX_BYTES) {
            match value.trim().parse::<usize>() {
                Ok(bytes) => {
                    tracing::info!(bytes, "Inline size limit configured from environment");
                    self.inline_max_bytes = bytes;
                }
                Err(_) => tracing::warn!(
                    "Failed to parse {}='{}', must be a valid usize",
                    ENV_INLINE_MAX_BYTES,
                    value
                ),
            }
        }

        if let Some(value) = lookup(ENV_SPILL_DIR) {
            if value.trim().is_empty() {
                tracing::warn!("Ignoring empty {}", ENV_SPILL_DIR);
            } else {
                self.spill_dir = PathBuf::from(value);
            }
        }

        if let Some(value) = lookup(ENV_SPILL_MAX_AGE_HOURS) {
            match value.trim().parse::<u64>() {
                Ok(hours) => self.spill_max_age = Duration::from_secs(hours * 60 * 60),
                Err(_) => tracing::warn!(
                    "Failed to parse {}='{}', must be a whole number of hours",
                    ENV_SPILL_MAX_AGE_HOURS,
                    value
                ),
            }
        }

        self
    }
}

/// PDF Reader MCP Server
#[derive(Clone)]
pub struct PdfServer {
    tool_router: ToolRouter<Self>,
    /// Server configuration
    config: Arc<ServerConfig>,
}

// ============================================================================
// Request types for unlock_pdf
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UnlockPdfParams {
    /// Absolute path to the PDF file
    pub file_path: String,
    /// Password for encrypted PDFs (leave empty for unprotected files)
    #[serde(default)]
    pub password: String,
    /// Specific pages to read (1-indexed). Omit to read every page.
    #[serde(default)]
    pub pages: Option<Vec<u32>>,
}

// ============================================================================
// Tool implementations
// ============================================================================

#[tool_router]
impl PdfServer {
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    /// Create a new PdfServer with full configuration
    pub fn with_config(config: ServerConfig) -> Self {
        Self {
            tool_router: Self::tool_router(),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Read the text of a PDF, unlocking it with a password when needed
    #[tool(
        description = "Read the full text of a PDF file. Supports password-protected and unprotected PDFs.

file_path must be absolute. Pass password for encrypted files (empty otherwise). Pages are separated by a form feed. If the text is too large to return directly, it is written to a temporary file and the response is \"Text too large; written to: <path> (<N> bytes)\"."
    )]
    async fn unlock_pdf(
        &self,
        Parameters(params): Parameters<UnlockPdfParams>,
    ) -> Result<CallToolResult, ErrorData> {
        match self.process_unlock_pdf(&params).await {
            Ok(payload) => Ok(CallToolResult::success(vec![Content::text(
                payload.into_response_text(),
            )])),
            Err(e) => {
                tracing::warn!(path = %params.file_path, error = %e, "unlock_pdf failed");
                Ok(CallToolResult::error(vec![Content::text(
                    e.client_message(),
                )]))
            }
        }
    }
}

impl PdfServer {
    /// Decode the requested PDF and route its text.
    ///
    /// Runs on the blocking pool; nothing is shared with other requests
    /// besides the read-only configuration.
    pub async fn process_unlock_pdf(
        &self,
        params: &UnlockPdfParams,
    ) -> crate::error::Result<OutputPayload> {
        let decoder = PdfDecoder::new(self.config.page_separator.clone());
        let router = OutputRouter::new(self.config.inline_max_bytes, self.config.spill_dir.clone());

        let path = PathBuf::from(&params.file_path);
        let password = Some(params.password.clone()).filter(|p| !p.is_empty());
        let pages = params.pages.clone();

        tokio::task::spawn_blocking(move || {
            let document = decoder.decode_pages(&path, password.as_deref(), pages.as_deref())?;
            router.route(document)
        })
        .await
        .map_err(|e| Error::Internal {
            reason: format!("Task join error: {}", e),
        })?
    }
}

impl Default for PdfServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_handler]
impl ServerHandler for PdfServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(INSTRUCTIONS.into()),
        }
    }
}

/// Run the MCP server with configuration taken from the environment
pub async fn run_server() -> Result<()> {
    run_server_with_config(ServerConfig::from_env()).await
}

/// Run the MCP server with full configuration
pub async fn run_server_with_config(config: ServerConfig) -> Result<()> {
    tracing::info!(
        spill_dir = %config.spill_dir.display(),
        inline_max_bytes = config.inline_max_bytes,
        "Using temporary directory for PDF extracts"
    );

    let removed = sweep_stale_extracts(&config.spill_dir, config.spill_max_age);
    if removed > 0 {
        tracing::info!(removed, "Removed stale extracts");
    }

    let server = PdfServer::with_config(config);

    tracing::info!("PDF Reader MCP Server ready, waiting for connections...");

    let service = server.serve(rmcp::transport::io::stdio()).await?;
    service.waiting().await?;

    Ok(())
}
