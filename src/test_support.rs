//! Scripted [`OcrBackend`] for unit tests.
//!
//! Counts every remote call so cache tests can assert "zero additional
//! remote calls" directly, and can be scripted to fail at any one of the
//! three steps to exercise the per-step error paths and the staged-file
//! release guarantee.

use crate::error::ExtractError;
use crate::remote::{OcrBackend, OcrPage, OcrResponse, RemoteFileHandle, SignedUrl};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Which remote step should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FailAt {
    Upload,
    SignedUrl,
    Process,
}

pub(crate) struct ScriptedBackend {
    pub uploads: AtomicUsize,
    pub signed_urls: AtomicUsize,
    pub processes: AtomicUsize,
    pages: Vec<OcrPage>,
    fail_at: Option<FailAt>,
}

impl ScriptedBackend {
    /// Backend that succeeds and returns the given pages.
    pub fn returning(pages: Vec<OcrPage>) -> Arc<Self> {
        Arc::new(Self {
            uploads: AtomicUsize::new(0),
            signed_urls: AtomicUsize::new(0),
            processes: AtomicUsize::new(0),
            pages,
            fail_at: None,
        })
    }

    /// Backend that fails at the given step.
    pub fn failing(step: FailAt) -> Arc<Self> {
        Arc::new(Self {
            uploads: AtomicUsize::new(0),
            signed_urls: AtomicUsize::new(0),
            processes: AtomicUsize::new(0),
            pages: Vec::new(),
            fail_at: Some(step),
        })
    }

    /// Total remote calls across all three steps.
    pub fn remote_calls(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
            + self.signed_urls.load(Ordering::SeqCst)
            + self.processes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OcrBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn upload(
        &self,
        file_name: &str,
        _bytes: Vec<u8>,
    ) -> Result<RemoteFileHandle, ExtractError> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        if self.fail_at == Some(FailAt::Upload) {
            return Err(ExtractError::UploadFailed {
                detail: "scripted upload failure".into(),
            });
        }
        Ok(RemoteFileHandle {
            id: "file-test".into(),
            filename: Some(file_name.to_string()),
        })
    }

    async fn signed_url(
        &self,
        handle: &RemoteFileHandle,
        _expiry_minutes: u32,
    ) -> Result<SignedUrl, ExtractError> {
        self.signed_urls.fetch_add(1, Ordering::SeqCst);
        if self.fail_at == Some(FailAt::SignedUrl) {
            return Err(ExtractError::SignedUrlFailed {
                file_id: handle.id.clone(),
                detail: "scripted signed-url failure".into(),
            });
        }
        Ok(SignedUrl {
            url: "https://signed.example/doc".into(),
        })
    }

    async fn process(
        &self,
        _document_url: &str,
        model: &str,
        _include_images: bool,
    ) -> Result<OcrResponse, ExtractError> {
        self.processes.fetch_add(1, Ordering::SeqCst);
        if self.fail_at == Some(FailAt::Process) {
            return Err(ExtractError::OcrFailed {
                detail: "scripted OCR failure".into(),
            });
        }
        Ok(OcrResponse {
            pages: self.pages.clone(),
            model: Some(model.to_string()),
            usage: None,
        })
    }
}
