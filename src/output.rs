//! Output types: the assembled text artifact and per-run statistics.
//!
//! The central type is [`TextArtifact`]. It is an enum rather than a plain
//! `String` because "the service found no text" is a distinct, *successful*
//! outcome that callers must be able to branch on without string-sniffing.
//! [`TextArtifact::Empty`] still renders as the fixed sentinel
//! [`NO_TEXT_SENTINEL`] so interactive front ends have something to show.

use serde::{Deserialize, Serialize};

/// Displayed (and downloadable) stand-in when extraction succeeded but no
/// page carried any text. A value, not an error.
pub const NO_TEXT_SENTINEL: &str = "❌ No text extracted.";

/// Conventional file name for a saved artifact.
pub const ARTIFACT_FILE_NAME: &str = "extracted_text.txt";

/// MIME type of a saved artifact.
pub const ARTIFACT_MIME: &str = "text/plain";

/// The assembled result of one extraction cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextArtifact {
    /// At least one page carried text; pages are concatenated in response
    /// order, each under a `### Page N` header.
    Text(String),
    /// The page collection was absent, empty, or carried no text blocks.
    Empty,
}

impl TextArtifact {
    /// The text to display or save. `Empty` renders as [`NO_TEXT_SENTINEL`].
    pub fn display_text(&self) -> &str {
        match self {
            TextArtifact::Text(s) => s,
            TextArtifact::Empty => NO_TEXT_SENTINEL,
        }
    }

    /// True when no page carried text.
    pub fn is_empty(&self) -> bool {
        matches!(self, TextArtifact::Empty)
    }
}

/// Timing and page counters for one extraction cycle.
///
/// All durations are wall-clock milliseconds. `upload_duration_ms` covers the
/// accept + signed-URL steps together (one logical hand-off to the service);
/// `ocr_duration_ms` covers the processing call alone, which dominates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Pages in the OCR response, whether or not they carried text.
    pub total_pages: usize,
    /// Pages that carried a markdown text block.
    pub pages_with_text: usize,
    /// Staging + upload + signed-URL time.
    pub upload_duration_ms: u64,
    /// OCR processing time.
    pub ocr_duration_ms: u64,
    /// End-to-end time including assembly.
    pub total_duration_ms: u64,
}

/// Everything produced by one extraction cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionOutput {
    /// The user-supplied document name the artifact was computed for.
    /// This is also the session-cache key.
    pub document_name: String,
    /// The assembled artifact.
    pub artifact: TextArtifact,
    /// Run statistics.
    pub stats: ExtractionStats,
}
