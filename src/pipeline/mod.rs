//! Pipeline stages for PDF text extraction.
//!
//! Each submodule implements exactly one transformation step. Keeping the
//! stages separate makes each independently testable and keeps the remote
//! transport (see [`crate::remote`]) out of the local plumbing.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ stage ──▶ upload ──▶ sign ──▶ ocr ──▶ assemble
//! (path)    (tempdir)  (file id)  (URL)   (pages)  (artifact)
//! ```
//!
//! 1. [`input`]    — validate a local path and read (bytes, document name)
//! 2. [`stage`]    — write the payload to scoped transient storage; the
//!    staged copy is what gets submitted, and it is released on every exit
//!    path via `Drop`
//! 3. upload/sign/ocr — the three remote steps, driven through the
//!    [`crate::remote::OcrBackend`] seam by [`crate::extract`]
//! 4. [`assemble`] — concatenate markdown-bearing pages under `### Page N`
//!    headers, or yield the empty-artifact sentinel
pub mod assemble;
pub mod input;
pub mod stage;
