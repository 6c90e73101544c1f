//! Remote OCR service boundary.
//!
//! The pipeline never talks HTTP directly — it drives an [`OcrBackend`],
//! which models the service contract as three operations consumed strictly
//! in order:
//!
//! 1. [`upload`](OcrBackend::upload) — hand the staged bytes to the service
//!    under the `"ocr"` purpose tag, receiving an opaque file id
//! 2. [`signed_url`](OcrBackend::signed_url) — trade the id for a
//!    time-bounded access URL (validity expressed in minutes)
//! 3. [`process`](OcrBackend::process) — run OCR against the signed URL,
//!    receiving per-page markdown
//!
//! The trait seam lets tests substitute a scripted backend and count calls,
//! and lets callers wrap the real client with middleware, without the
//! pipeline knowing. [`MistralClient`](mistral::MistralClient) is the
//! production implementation.

pub mod mistral;

use crate::error::ExtractError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Opaque handle returned by the upload step.
///
/// Consumed exactly once by the signed-URL step, then discarded. The service
/// keeps the uploaded document in its own storage; this crate never deletes
/// it (an accepted limitation of the design).
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteFileHandle {
    /// Service-assigned file id.
    pub id: String,
    /// File name as echoed back by the service.
    #[serde(default)]
    pub filename: Option<String>,
}

/// Short-lived access URL for an uploaded file.
#[derive(Debug, Clone, Deserialize)]
pub struct SignedUrl {
    pub url: String,
}

/// One page of the OCR response, in service order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrPage {
    /// Page index as reported by the service (0-based).
    #[serde(default)]
    pub index: usize,
    /// Markdown-formatted page text. Absent when the service produced no
    /// text block for this page.
    #[serde(default)]
    pub markdown: Option<String>,
}

/// Usage counters reported alongside the pages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OcrUsage {
    #[serde(default)]
    pub pages_processed: usize,
    #[serde(default)]
    pub doc_size_bytes: Option<u64>,
}

/// The OCR processing response: zero or more pages plus usage counters.
#[derive(Debug, Clone, Deserialize)]
pub struct OcrResponse {
    #[serde(default)]
    pub pages: Vec<OcrPage>,
    /// Model that served the request, echoed back.
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default, rename = "usage_info")]
    pub usage: Option<OcrUsage>,
}

/// Async trait implemented by each OCR transport.
///
/// Implementations are transport-only: they move bytes and parse wire
/// shapes, mapping each step's failures to the matching
/// [`ExtractError`] variant (`UploadFailed` / `SignedUrlFailed` /
/// `OcrFailed`). Sequencing, staging, and assembly live in the pipeline.
#[async_trait]
pub trait OcrBackend: Send + Sync {
    /// Backend identifier for logs.
    fn name(&self) -> &str;

    /// Accept step: submit the document bytes for OCR-purposed storage.
    async fn upload(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<RemoteFileHandle, ExtractError>;

    /// Mint a signed access URL for an uploaded file, valid for
    /// `expiry_minutes`.
    async fn signed_url(
        &self,
        handle: &RemoteFileHandle,
        expiry_minutes: u32,
    ) -> Result<SignedUrl, ExtractError>;

    /// Run OCR against the signed URL with the given model id.
    /// `include_images` controls whether page images are embedded in the
    /// response (this pipeline always asks for text only).
    async fn process(
        &self,
        document_url: &str,
        model: &str,
        include_images: bool,
    ) -> Result<OcrResponse, ExtractError>;
}
