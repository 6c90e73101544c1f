//! Session-scoped memoisation of extraction results.
//!
//! One interactive session holds at most one cached [`ExtractionOutput`],
//! keyed by the name of the most recently extracted document. Resubmitting
//! the same name returns the cached output with **zero** remote calls;
//! submitting a different name recomputes and replaces the slot.
//!
//! The cache is an explicit context object the caller owns and threads
//! through, not ambient global state — the pipeline stays testable in
//! isolation and two sessions can coexist without touching each other.
//! Exactly one logical thread of control drives a session at a time, so the
//! slot needs no locking.
//!
//! ## Slot state machine
//!
//! ```text
//! Empty ──extract──▶ Cached ──same name──▶ Cached   (no remote work)
//!                      │
//!                      └──new name──▶ Cached        (one new cycle)
//! ```
//!
//! A failed recompute leaves the previous slot untouched: the old artifact
//! is still in sync with its own document name.

use crate::config::ExtractConfig;
use crate::error::ExtractError;
use crate::extract;
use crate::output::ExtractionOutput;
use tracing::{debug, info};

/// Per-session cache: a single slot keyed by document name.
#[derive(Debug, Default)]
pub struct ExtractionSession {
    slot: Option<ExtractionOutput>,
}

impl ExtractionSession {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the currently cached document, if any.
    pub fn cached_name(&self) -> Option<&str> {
        self.slot.as_ref().map(|o| o.document_name.as_str())
    }

    /// Drop the cached result, if any.
    pub fn invalidate(&mut self) {
        self.slot = None;
    }

    /// Return the cached output for `name`, or run one extraction cycle.
    ///
    /// This is the sole entry point guarding against redundant remote work:
    /// a cache hit performs no staging and no network I/O. On a miss the
    /// result of [`extract::extract_bytes`] replaces the slot; on failure
    /// the slot is left as it was and the error propagates.
    pub async fn get_or_compute(
        &mut self,
        payload: &[u8],
        name: &str,
        config: &ExtractConfig,
    ) -> Result<ExtractionOutput, ExtractError> {
        if let Some(ref cached) = self.slot {
            if cached.document_name == name {
                debug!("Cache hit for '{}', skipping remote extraction", name);
                return Ok(cached.clone());
            }
            info!(
                "Document changed ('{}' → '{}'), invalidating cached result",
                cached.document_name, name
            );
        }

        let output = extract::extract_bytes(payload, name, config).await?;
        self.slot = Some(output.clone());
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailAt, ScriptedBackend};
    use crate::remote::OcrPage;
    use std::sync::Arc;

    fn pages(texts: &[&str]) -> Vec<OcrPage> {
        texts
            .iter()
            .map(|t| OcrPage {
                index: 0,
                markdown: Some(t.to_string()),
            })
            .collect()
    }

    fn config_with(backend: Arc<ScriptedBackend>) -> ExtractConfig {
        ExtractConfig::builder().backend(backend).build().unwrap()
    }

    #[tokio::test]
    async fn resubmitting_the_same_name_makes_zero_remote_calls() {
        let backend = ScriptedBackend::returning(pages(&["hello"]));
        let config = config_with(Arc::clone(&backend));
        let mut session = ExtractionSession::new();

        let first = session
            .get_or_compute(b"%PDF-1.4", "doc.pdf", &config)
            .await
            .unwrap();
        assert_eq!(backend.remote_calls(), 3);

        let second = session
            .get_or_compute(b"%PDF-1.4", "doc.pdf", &config)
            .await
            .unwrap();
        assert_eq!(backend.remote_calls(), 3, "cache hit must not touch the backend");
        assert_eq!(first.artifact, second.artifact);
        assert_eq!(first.stats.total_pages, second.stats.total_pages);
    }

    #[tokio::test]
    async fn a_new_name_invalidates_and_runs_exactly_one_new_cycle() {
        let backend = ScriptedBackend::returning(pages(&["hello"]));
        let config = config_with(Arc::clone(&backend));
        let mut session = ExtractionSession::new();

        session
            .get_or_compute(b"%PDF-1.4", "first.pdf", &config)
            .await
            .unwrap();
        session
            .get_or_compute(b"%PDF-1.4", "second.pdf", &config)
            .await
            .unwrap();

        assert_eq!(backend.remote_calls(), 6, "exactly two full cycles");
        assert_eq!(session.cached_name(), Some("second.pdf"));
    }

    #[tokio::test]
    async fn a_failed_recompute_leaves_the_previous_slot_in_place() {
        let good = ScriptedBackend::returning(pages(&["hello"]));
        let mut session = ExtractionSession::new();
        session
            .get_or_compute(b"%PDF-1.4", "first.pdf", &config_with(good))
            .await
            .unwrap();

        let bad = ScriptedBackend::failing(FailAt::Process);
        let result = session
            .get_or_compute(b"%PDF-1.4", "second.pdf", &config_with(bad))
            .await;

        assert!(result.is_err());
        assert_eq!(
            session.cached_name(),
            Some("first.pdf"),
            "failed recompute must not clobber the cached result"
        );
    }

    #[tokio::test]
    async fn invalidate_empties_the_slot() {
        let backend = ScriptedBackend::returning(pages(&["hello"]));
        let config = config_with(Arc::clone(&backend));
        let mut session = ExtractionSession::new();

        session
            .get_or_compute(b"%PDF-1.4", "doc.pdf", &config)
            .await
            .unwrap();
        session.invalidate();
        assert_eq!(session.cached_name(), None);

        session
            .get_or_compute(b"%PDF-1.4", "doc.pdf", &config)
            .await
            .unwrap();
        assert_eq!(backend.remote_calls(), 6, "invalidation forces a fresh cycle");
    }

    #[tokio::test]
    async fn an_empty_artifact_is_cached_like_any_other_result() {
        let backend = ScriptedBackend::returning(vec![]);
        let config = config_with(Arc::clone(&backend));
        let mut session = ExtractionSession::new();

        let first = session
            .get_or_compute(b"%PDF-1.4", "blank.pdf", &config)
            .await
            .unwrap();
        assert!(first.artifact.is_empty());

        let second = session
            .get_or_compute(b"%PDF-1.4", "blank.pdf", &config)
            .await
            .unwrap();
        assert!(second.artifact.is_empty());
        assert_eq!(backend.remote_calls(), 3, "the empty outcome is memoised too");
    }
}
