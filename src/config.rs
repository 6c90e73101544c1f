//! Configuration types for text extraction.
//!
//! All pipeline behaviour is controlled through [`ExtractConfig`], built via
//! its [`ExtractConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share a config across calls, log it, and diff two runs to
//! understand why their outputs differ.
//!
//! # Design choice: builder over constructor
//! The builder lets callers set only what they care about and rely on
//! well-documented defaults for the rest; `build()` validates the result
//! instead of deferring bad values to the middle of a remote call.

use crate::error::ExtractError;
use crate::remote::mistral::DEFAULT_BASE_URL;
use crate::remote::OcrBackend;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Model identifier used when none is configured.
pub const DEFAULT_MODEL: &str = "mistral-ocr-latest";

/// Configuration for a PDF text extraction.
///
/// Built via [`ExtractConfig::builder()`] or [`ExtractConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf2text_ocr::ExtractConfig;
///
/// let config = ExtractConfig::builder()
///     .model("mistral-ocr-latest")
///     .url_expiry_minutes(5)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ExtractConfig {
    /// API credential. If `None`, the `MISTRAL_API_KEY` environment variable
    /// is consulted when the backend is resolved; if that is also absent the
    /// pipeline fails with [`ExtractError::MissingApiKey`] before any
    /// staging or network I/O.
    pub api_key: Option<String>,

    /// Base URL of the OCR service. Default: the public Mistral endpoint.
    ///
    /// Overridable for self-hosted gateways and for tests that point the
    /// client at a local server.
    pub base_url: String,

    /// OCR model identifier. Default: [`DEFAULT_MODEL`].
    pub model: String,

    /// Signed-URL validity in minutes. Default: 5.
    ///
    /// The URL is consumed immediately by the processing call, so it only
    /// needs to outlive one request; a few minutes of slack covers queueing
    /// on the service side without leaving a long-lived capability around.
    pub url_expiry_minutes: u32,

    /// Per-remote-call timeout in seconds. Default: 120.
    ///
    /// OCR of a large document is the slow step; the upload and signed-URL
    /// calls finish in well under a second on any healthy connection.
    pub api_timeout_secs: u64,

    /// Ask the service to embed page images in the response. Default: false.
    ///
    /// This pipeline produces a text artifact, so images are dead weight in
    /// the response body; leaving them out cuts transfer size dramatically
    /// on scanned documents.
    pub include_images: bool,

    /// Parent directory for transient staging. If `None`, the system temp
    /// directory is used. Tests set this to observe that staged files are
    /// released.
    pub staging_dir: Option<PathBuf>,

    /// Pre-constructed backend. Takes precedence over `api_key` — used by
    /// tests and by callers that wrap the client with middleware.
    pub backend: Option<Arc<dyn OcrBackend>>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            url_expiry_minutes: 5,
            api_timeout_secs: 120,
            include_images: false,
            staging_dir: None,
            backend: None,
        }
    }
}

// Manual Debug: never print the credential, and a trait object has no
// useful Debug of its own.
impl fmt::Debug for ExtractConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("url_expiry_minutes", &self.url_expiry_minutes)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field("include_images", &self.include_images)
            .field("staging_dir", &self.staging_dir)
            .field("backend", &self.backend.as_ref().map(|_| "<dyn OcrBackend>"))
            .finish()
    }
}

impl ExtractConfig {
    /// Create a new builder for `ExtractConfig`.
    pub fn builder() -> ExtractConfigBuilder {
        ExtractConfigBuilder {
            config: Self::default(),
        }
    }

    /// The credential that backend resolution would use, if any:
    /// the configured key, else `MISTRAL_API_KEY` from the environment.
    /// Empty strings count as absent.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var("MISTRAL_API_KEY").ok().filter(|k| !k.is_empty()))
    }
}

/// Builder for [`ExtractConfig`].
#[derive(Debug)]
pub struct ExtractConfigBuilder {
    config: ExtractConfig,
}

impl ExtractConfigBuilder {
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn url_expiry_minutes(mut self, minutes: u32) -> Self {
        self.config.url_expiry_minutes = minutes.max(1);
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs.max(1);
        self
    }

    pub fn include_images(mut self, v: bool) -> Self {
        self.config.include_images = v;
        self
    }

    pub fn staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.staging_dir = Some(dir.into());
        self
    }

    pub fn backend(mut self, backend: Arc<dyn OcrBackend>) -> Self {
        self.config.backend = Some(backend);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractConfig, ExtractError> {
        let c = &self.config;
        if c.model.trim().is_empty() {
            return Err(ExtractError::InvalidConfig(
                "Model identifier must be non-empty".into(),
            ));
        }
        if !c.base_url.starts_with("http://") && !c.base_url.starts_with("https://") {
            return Err(ExtractError::InvalidConfig(format!(
                "Base URL must be http(s), got '{}'",
                c.base_url
            )));
        }
        if c.url_expiry_minutes == 0 {
            return Err(ExtractError::InvalidConfig(
                "Signed-URL expiry must be ≥ 1 minute".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_service_contract() {
        let c = ExtractConfig::default();
        assert_eq!(c.model, "mistral-ocr-latest");
        assert_eq!(c.url_expiry_minutes, 5);
        assert!(!c.include_images);
        assert_eq!(c.base_url, "https://api.mistral.ai");
    }

    #[test]
    fn builder_rejects_empty_model() {
        let result = ExtractConfig::builder().model("  ").build();
        assert!(matches!(result, Err(ExtractError::InvalidConfig(_))));
    }

    #[test]
    fn builder_rejects_non_http_base_url() {
        let result = ExtractConfig::builder().base_url("ftp://nope").build();
        assert!(matches!(result, Err(ExtractError::InvalidConfig(_))));
    }

    #[test]
    fn expiry_setter_clamps_to_one_minute() {
        let c = ExtractConfig::builder().url_expiry_minutes(0).build().unwrap();
        assert_eq!(c.url_expiry_minutes, 1);
    }

    #[test]
    fn debug_never_leaks_the_key() {
        let c = ExtractConfig::builder().api_key("sk-very-secret").build().unwrap();
        let dbg = format!("{c:?}");
        assert!(!dbg.contains("sk-very-secret"));
    }

    #[test]
    fn empty_api_key_counts_as_absent() {
        let c = ExtractConfig::builder().api_key("").build().unwrap();
        // Only checks the configured-key half; the env half depends on the
        // ambient environment and is covered in extract::tests.
        assert!(c.api_key.as_deref() == Some(""));
        assert!(c.api_key.clone().filter(|k| !k.is_empty()).is_none());
    }
}
