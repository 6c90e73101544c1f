//! # pdf2text-ocr
//!
//! Extract text from PDF documents with the Mistral OCR cloud service.
//!
//! ## Why this crate?
//!
//! Traditional PDF-to-text tools (pdftotext, pdf-extract) fail on scanned
//! documents and complex layouts — there is simply no embedded text to pull
//! out, or it comes out garbled and out of reading order. Instead this crate
//! hands the document to a managed OCR service that performs the layout
//! analysis and text extraction remotely, and focuses on being good glue:
//! staging, the three-step remote hand-off, per-page assembly, and a
//! session cache so an unchanged document is never processed twice.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input     read a local file, validate %PDF magic
//!  ├─ 2. Stage     write bytes to scoped transient storage (RAII cleanup)
//!  ├─ 3. Upload    POST /v1/files  purpose=ocr  → file id
//!  ├─ 4. Sign      GET  /v1/files/{id}/url     → short-lived access URL
//!  ├─ 5. OCR       POST /v1/ocr                → per-page markdown
//!  └─ 6. Assemble  "### Page N" headed blocks → one text artifact
//! ```
//!
//! Steps 3–5 run strictly in sequence against [`remote::OcrBackend`];
//! the staged file from step 2 is deleted when the cycle ends, whether it
//! succeeded or failed.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2text_ocr::{extract_path, ExtractConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Credential read from MISTRAL_API_KEY
//!     let config = ExtractConfig::default();
//!     let output = extract_path("document.pdf", &config).await?;
//!     println!("{}", output.artifact.display_text());
//!     eprintln!(
//!         "{}/{} pages carried text",
//!         output.stats.pages_with_text, output.stats.total_pages
//!     );
//!     Ok(())
//! }
//! ```
//!
//! To avoid re-processing an unchanged document within one interactive
//! session, go through [`ExtractionSession`]:
//!
//! ```rust,no_run
//! use pdf2text_ocr::{read_document, ExtractConfig, ExtractionSession};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ExtractConfig::default();
//! let mut session = ExtractionSession::new();
//! let (bytes, name) = read_document("document.pdf")?;
//! let first = session.get_or_compute(&bytes, &name, &config).await?;
//! // Same name again: returned from the cache, zero remote calls.
//! let second = session.get_or_compute(&bytes, &name, &config).await?;
//! assert_eq!(first.artifact, second.artifact);
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2text` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! pdf2text-ocr = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod extract;
pub mod output;
pub mod pipeline;
pub mod remote;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ExtractConfig, ExtractConfigBuilder, DEFAULT_MODEL};
pub use error::ExtractError;
pub use extract::{extract_bytes, extract_path, extract_sync, extract_to_file, write_artifact};
pub use output::{
    ExtractionOutput, ExtractionStats, TextArtifact, ARTIFACT_FILE_NAME, ARTIFACT_MIME,
    NO_TEXT_SENTINEL,
};
pub use pipeline::input::read_document;
pub use remote::mistral::MistralClient;
pub use remote::{OcrBackend, OcrPage, OcrResponse, RemoteFileHandle, SignedUrl};
pub use session::ExtractionSession;
