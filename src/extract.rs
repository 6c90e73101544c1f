//! Extraction entry points: drive one full ingest → remote → assemble cycle.
//!
//! The sequence is strictly linear — stage, upload, sign, process, assemble —
//! with no internal parallelism; the remote calls are awaited one after the
//! other and the caller blocks until the cycle completes. The staged copy of
//! the payload lives exactly as long as the remote round trip: it is created
//! immediately before the upload and released on *every* path out of
//! [`extract_bytes`], success or failure, by virtue of being a droppable
//! scope-owned value.
//!
//! Callers that want memoisation go through
//! [`crate::session::ExtractionSession`] instead of calling these functions
//! directly.

use crate::config::ExtractConfig;
use crate::error::ExtractError;
use crate::output::{ExtractionOutput, ExtractionStats, TextArtifact};
use crate::pipeline::{assemble, input, stage};
use crate::remote::mistral::MistralClient;
use crate::remote::OcrBackend;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Extract text from in-memory PDF bytes.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `payload` — Raw PDF bytes
/// * `name` — Declared document name (also the session-cache key)
/// * `config` — Extraction configuration
///
/// # Errors
/// * [`ExtractError::MissingApiKey`] — no credential; raised before any
///   staging or network I/O
/// * [`ExtractError::StagingFailed`] — transient storage write failed
/// * [`ExtractError::UploadFailed`] / [`ExtractError::SignedUrlFailed`] /
///   [`ExtractError::OcrFailed`] — one of the three remote steps failed
///
/// An OCR response with no text is **not** an error; it yields
/// [`TextArtifact::Empty`].
pub async fn extract_bytes(
    payload: &[u8],
    name: &str,
    config: &ExtractConfig,
) -> Result<ExtractionOutput, ExtractError> {
    let total_start = Instant::now();
    info!("Starting extraction: {}", name);

    // ── Step 1: Resolve the backend ──────────────────────────────────────
    // The credential check lives here so a misconfigured environment fails
    // before a single byte is staged or sent.
    let backend = resolve_backend(config)?;

    // ── Step 2: Stage the payload ────────────────────────────────────────
    // `staged` is dropped on every exit path below, which deletes the
    // transient file — the `?` operators double as the cleanup guarantee.
    let upload_start = Instant::now();
    let staged = stage::stage(payload, name, config.staging_dir.as_deref()).await?;
    let staged_bytes =
        tokio::fs::read(staged.path())
            .await
            .map_err(|e| ExtractError::StagingFailed {
                name: name.to_string(),
                source: e,
            })?;

    // ── Step 3: Upload for OCR ───────────────────────────────────────────
    let handle = backend.upload(name, staged_bytes).await?;

    // ── Step 4: Mint the signed URL ──────────────────────────────────────
    let signed = backend
        .signed_url(&handle, config.url_expiry_minutes)
        .await?;
    let upload_duration_ms = upload_start.elapsed().as_millis() as u64;

    // ── Step 5: OCR processing ───────────────────────────────────────────
    let ocr_start = Instant::now();
    let response = backend
        .process(&signed.url, &config.model, config.include_images)
        .await?;
    let ocr_duration_ms = ocr_start.elapsed().as_millis() as u64;

    // ── Step 6: Assemble the artifact ────────────────────────────────────
    let total_pages = response.pages.len();
    let pages_with_text = assemble::pages_with_text(&response.pages);
    let artifact = assemble::assemble_pages(&response.pages);

    // Staged copy released here; the remote round trip is over.
    drop(staged);

    let stats = ExtractionStats {
        total_pages,
        pages_with_text,
        upload_duration_ms,
        ocr_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Extraction complete: {}/{} pages carried text, {}ms total",
        pages_with_text, total_pages, stats.total_duration_ms
    );

    Ok(ExtractionOutput {
        document_name: name.to_string(),
        artifact,
        stats,
    })
}

/// Extract text from a local PDF file.
///
/// Validates the path (existence, readability, `%PDF` magic) and runs
/// [`extract_bytes`] with the file name as the document name.
pub async fn extract_path(
    path: impl AsRef<Path>,
    config: &ExtractConfig,
) -> Result<ExtractionOutput, ExtractError> {
    let (bytes, name) = input::read_document(path)?;
    extract_bytes(&bytes, &name, config).await
}

/// Extract text from a local PDF and write the artifact to a file.
///
/// Uses atomic write (temp file + rename) to prevent partial files. The
/// conventional file name is [`crate::output::ARTIFACT_FILE_NAME`].
pub async fn extract_to_file(
    path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ExtractConfig,
) -> Result<ExtractionOutput, ExtractError> {
    let output = extract_path(path, config).await?;
    write_artifact(&output.artifact, output_path).await?;
    Ok(output)
}

/// Write an artifact's display text to `path` atomically.
///
/// The empty artifact writes its sentinel line — saving a "no text" result
/// is a legitimate outcome, not a failure.
pub async fn write_artifact(
    artifact: &TextArtifact,
    path: impl AsRef<Path>,
) -> Result<(), ExtractError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ExtractError::OutputWriteFailed {
                    path: path.to_path_buf(),
                    source: e,
                })?;
        }
    }

    let tmp_path = path.with_extension("txt.tmp");
    tokio::fs::write(&tmp_path, artifact.display_text())
        .await
        .map_err(|e| ExtractError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| ExtractError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    debug!("Wrote artifact to {}", path.display());
    Ok(())
}

/// Synchronous wrapper around [`extract_bytes`].
///
/// Creates a temporary tokio runtime internally.
pub fn extract_sync(
    payload: &[u8],
    name: &str,
    config: &ExtractConfig,
) -> Result<ExtractionOutput, ExtractError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ExtractError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(extract_bytes(payload, name, config))
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Resolve the OCR backend, from most-specific to least-specific.
///
/// 1. **Pre-built backend** (`config.backend`) — the caller constructed the
///    transport entirely; used as-is. This is how tests inject a scripted
///    backend and how callers add middleware.
/// 2. **Configured key** (`config.api_key`), else the `MISTRAL_API_KEY`
///    environment variable — builds a [`MistralClient`] against
///    `config.base_url`.
/// 3. Neither present → [`ExtractError::MissingApiKey`]. Nothing has been
///    staged and no connection has been opened at this point.
fn resolve_backend(config: &ExtractConfig) -> Result<Arc<dyn OcrBackend>, ExtractError> {
    if let Some(ref backend) = config.backend {
        return Ok(Arc::clone(backend));
    }

    let key = config
        .resolved_api_key()
        .ok_or(ExtractError::MissingApiKey)?;

    Ok(Arc::new(MistralClient::new(
        key,
        config.base_url.as_str(),
        config.api_timeout_secs,
    )?))
}
