//! Input resolution: read a user-supplied PDF path into an uploadable payload.
//!
//! Validation happens here, before anything is staged or sent anywhere:
//! existence, read permission, and the `%PDF` magic bytes. Rejecting a
//! non-PDF locally produces a meaningful error instead of burning a remote
//! round trip on a file the service will refuse anyway.

use crate::error::ExtractError;
use std::path::Path;
use tracing::debug;

/// Read and validate a local PDF, returning its bytes and document name.
///
/// The document name is the file name component of the path; it identifies
/// the document for staging and for the session cache.
pub fn read_document(path: impl AsRef<Path>) -> Result<(Vec<u8>, String), ExtractError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ExtractError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(ExtractError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(_) => {
            return Err(ExtractError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
    };

    // Verify PDF magic bytes
    if bytes.len() < 4 || &bytes[..4] != b"%PDF" {
        let mut magic = [0u8; 4];
        let n = bytes.len().min(4);
        magic[..n].copy_from_slice(&bytes[..n]);
        return Err(ExtractError::NotAPdf {
            path: path.to_path_buf(),
            magic,
        });
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document.pdf".to_string());

    debug!("Resolved local PDF: {} ({} bytes)", path.display(), bytes.len());
    Ok((bytes, name))
}
