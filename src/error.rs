//! Error types for the pdf2text-ocr library.
//!
//! Every failure the pipeline can hit is a variant of [`ExtractError`],
//! grouped by the stage that produced it: configuration, local input,
//! staging, the three remote steps (upload → signed URL → OCR), and
//! output writing.
//!
//! One deliberate non-error: an OCR response whose pages carry no text is
//! **not** represented here. That outcome is
//! [`crate::output::TextArtifact::Empty`] — a valid, displayable result.
//! Modelling it as an error would force every caller to special-case a
//! perfectly successful round trip.
//!
//! No variant is retried automatically; a fresh user-initiated resubmission
//! is the only recovery path.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pdf2text-ocr library.
#[derive(Debug, Error)]
pub enum ExtractError {
    // ── Configuration errors ──────────────────────────────────────────────
    /// No API credential could be resolved. Fatal — checked before any
    /// staging or network I/O.
    #[error(
        "MISTRAL_API_KEY is not set.\n\
         Export it, pass --api-key, or inject a backend via the config:\n  \
         export MISTRAL_API_KEY=..."
    )]
    MissingApiKey,

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── Staging errors ────────────────────────────────────────────────────
    /// The payload could not be written to transient storage.
    #[error("Failed to stage '{name}' to transient storage: {source}\nCheck free space and permissions on the temp directory.")]
    StagingFailed {
        name: String,
        #[source]
        source: std::io::Error,
    },

    // ── Remote errors, one variant per remote step ────────────────────────
    /// The upload (accept) step failed — network, auth, or quota.
    #[error("Upload to the OCR service failed: {detail}\nCheck your network connection and API key.")]
    UploadFailed { detail: String },

    /// The signed-URL step failed — the file id was rejected or expired.
    #[error("Could not obtain a signed URL for remote file '{file_id}': {detail}")]
    SignedUrlFailed { file_id: String, detail: String },

    /// The OCR processing step failed remotely.
    #[error("OCR processing failed: {detail}")]
    OcrFailed { detail: String },

    /// The OCR call exceeded the configured timeout.
    #[error("OCR call timed out after {secs}s\nIncrease --api-timeout for large documents.")]
    OcrTimeout { secs: u64 },

    /// The service answered 2xx but the body did not match the documented shape.
    #[error("Malformed response from the OCR service: {detail}")]
    MalformedResponse { detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output text file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
