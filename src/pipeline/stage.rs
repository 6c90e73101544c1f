//! Staging: persist the payload to scoped transient storage.
//!
//! ## Why stage at all?
//!
//! The uploaded payload lives in memory for one interaction; the staged copy
//! is the durable-enough representation that feeds the remote submission.
//! Holding it in a [`TempDir`] keyed struct gives a hard guarantee: the
//! staged file is gone after extraction returns, whether the remote round
//! trip succeeded or failed at any step.
//! `Drop` runs on every exit path (including `?` early returns and panics),
//! so no manual cleanup calls are scattered across success and failure
//! branches.

use crate::error::ExtractError;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

/// A transient on-disk copy of the document, deleted on drop.
pub struct StagedDocument {
    path: PathBuf,
    // Kept alive solely so the directory (and the file in it) is removed
    // when the staged document goes out of scope.
    _dir: TempDir,
}

impl StagedDocument {
    /// Path of the staged file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Stage `payload` under a name derived from the document name.
///
/// `parent` overrides the staging location; `None` uses the system temp
/// directory. The derived name strips any path components from `name` so a
/// hostile "name" cannot escape the staging directory.
pub async fn stage(
    payload: &[u8],
    name: &str,
    parent: Option<&Path>,
) -> Result<StagedDocument, ExtractError> {
    let dir = match parent {
        Some(p) => TempDir::new_in(p),
        None => TempDir::new(),
    }
    .map_err(|e| ExtractError::StagingFailed {
        name: name.to_string(),
        source: e,
    })?;

    let path = dir.path().join(staged_file_name(name));
    tokio::fs::write(&path, payload)
        .await
        .map_err(|e| ExtractError::StagingFailed {
            name: name.to_string(),
            source: e,
        })?;

    debug!("Staged '{}' at {} ({} bytes)", name, path.display(), payload.len());
    Ok(StagedDocument { path, _dir: dir })
}

/// Derive the on-disk name for a staged document.
///
/// Path separators and parent references are dropped; an empty result falls
/// back to a fixed name so staging never produces a directory path.
fn staged_file_name(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name)
        .trim()
        .trim_start_matches('.');
    if base.is_empty() {
        "staged_document.pdf".to_string()
    } else {
        format!("staged_{base}")
    }
}
