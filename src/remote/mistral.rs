//! Mistral OCR API client.
//!
//! Implements [`OcrBackend`] against the public Mistral endpoints:
//!
//! | Step       | Endpoint                          | Body                    |
//! |------------|-----------------------------------|-------------------------|
//! | upload     | `POST /v1/files`                  | multipart, purpose=ocr  |
//! | signed_url | `GET /v1/files/{id}/url?expiry=N` | —                       |
//! | process    | `POST /v1/ocr`                    | JSON [`OcrRequest`]     |
//!
//! The base URL is configurable so tests and self-hosted gateways can point
//! the client elsewhere. Error mapping is per-step: a failure in each call
//! becomes the matching `ExtractError` variant so callers can tell *which*
//! remote step broke without parsing message strings.

use crate::error::ExtractError;
use crate::remote::{OcrBackend, OcrResponse, RemoteFileHandle, SignedUrl};
use async_trait::async_trait;
use reqwest::multipart;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

/// Default public API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.mistral.ai";

/// Purpose tag attached to every upload so the service routes the file to
/// its OCR-capable storage tier.
const UPLOAD_PURPOSE: &str = "ocr";

/// JSON body of the OCR processing request.
#[derive(Debug, Serialize)]
struct OcrRequest<'a> {
    model: &'a str,
    document: DocumentSource<'a>,
    include_image_base64: bool,
}

/// Document reference accepted by the OCR endpoint. Only the signed-URL form
/// is used here; the enum matches the service's tagged union so adding the
/// `image_url` form later is a one-variant change.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum DocumentSource<'a> {
    DocumentUrl { document_url: &'a str },
}

/// Production [`OcrBackend`] talking to the Mistral API over HTTPS.
pub struct MistralClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout_secs: u64,
}

impl MistralClient {
    /// Build a client with the given credential and base URL.
    ///
    /// `timeout_secs` bounds each individual call; the OCR step of a large
    /// document is the one that needs headroom.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, ExtractError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ExtractError::Internal(format!("HTTP client construction: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            timeout_secs,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Read the body of a non-2xx response into a compact error detail.
    async fn error_detail(response: reqwest::Response) -> String {
        let status = response.status();
        match response.text().await {
            Ok(body) if !body.trim().is_empty() => {
                // Keep the detail single-line and bounded.
                let body: String = body.replace('\n', " ").chars().take(300).collect();
                format!("HTTP {status}: {body}")
            }
            _ => format!("HTTP {status}"),
        }
    }
}

impl std::fmt::Debug for MistralClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MistralClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[async_trait]
impl OcrBackend for MistralClient {
    fn name(&self) -> &str {
        "mistral"
    }

    async fn upload(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<RemoteFileHandle, ExtractError> {
        info!("Uploading '{}' ({} bytes) for OCR", file_name, bytes.len());

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("application/pdf")
            .map_err(|e| ExtractError::Internal(format!("multipart: {e}")))?;
        let form = multipart::Form::new()
            .text("purpose", UPLOAD_PURPOSE)
            .part("file", part);

        let response = self
            .http
            .post(self.endpoint("/v1/files"))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ExtractError::UploadFailed {
                detail: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(ExtractError::UploadFailed {
                detail: Self::error_detail(response).await,
            });
        }

        let handle: RemoteFileHandle =
            response
                .json()
                .await
                .map_err(|e| ExtractError::UploadFailed {
                    detail: format!("unreadable upload response: {e}"),
                })?;

        debug!("Upload accepted, file id {}", handle.id);
        Ok(handle)
    }

    async fn signed_url(
        &self,
        handle: &RemoteFileHandle,
        expiry_minutes: u32,
    ) -> Result<SignedUrl, ExtractError> {
        debug!(
            "Requesting signed URL for {} (expiry {}min)",
            handle.id, expiry_minutes
        );

        let response = self
            .http
            .get(self.endpoint(&format!("/v1/files/{}/url", handle.id)))
            .query(&[("expiry", expiry_minutes)])
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| ExtractError::SignedUrlFailed {
                file_id: handle.id.clone(),
                detail: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(ExtractError::SignedUrlFailed {
                file_id: handle.id.clone(),
                detail: Self::error_detail(response).await,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ExtractError::SignedUrlFailed {
                file_id: handle.id.clone(),
                detail: format!("unreadable signed-url response: {e}"),
            })
    }

    async fn process(
        &self,
        document_url: &str,
        model: &str,
        include_images: bool,
    ) -> Result<OcrResponse, ExtractError> {
        info!("Requesting OCR with model '{}'", model);

        let request = OcrRequest {
            model,
            document: DocumentSource::DocumentUrl { document_url },
            include_image_base64: include_images,
        };

        let response = self
            .http
            .post(self.endpoint("/v1/ocr"))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ExtractError::OcrTimeout {
                        secs: self.timeout_secs,
                    }
                } else {
                    ExtractError::OcrFailed {
                        detail: e.to_string(),
                    }
                }
            })?;

        if !response.status().is_success() {
            return Err(ExtractError::OcrFailed {
                detail: Self::error_detail(response).await,
            });
        }

        let parsed: OcrResponse =
            response
                .json()
                .await
                .map_err(|e| ExtractError::MalformedResponse {
                    detail: e.to_string(),
                })?;

        debug!("OCR returned {} pages", parsed.pages.len());
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ocr_request_serialises_to_the_documented_shape() {
        let request = OcrRequest {
            model: "mistral-ocr-latest",
            document: DocumentSource::DocumentUrl {
                document_url: "https://files.example/signed",
            },
            include_image_base64: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "mistral-ocr-latest",
                "document": {
                    "type": "document_url",
                    "document_url": "https://files.example/signed",
                },
                "include_image_base64": false,
            })
        );
    }

    #[test]
    fn ocr_response_parses_pages_with_and_without_markdown() {
        let body = r##"{
            "pages": [
                {"index": 0, "markdown": "# Title"},
                {"index": 1},
                {"index": 2, "markdown": "tail"}
            ],
            "model": "mistral-ocr-latest",
            "usage_info": {"pages_processed": 3, "doc_size_bytes": 1024}
        }"##;
        let parsed: OcrResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.pages.len(), 3);
        assert_eq!(parsed.pages[0].markdown.as_deref(), Some("# Title"));
        assert!(parsed.pages[1].markdown.is_none());
        assert_eq!(parsed.usage.unwrap().pages_processed, 3);
    }

    #[test]
    fn ocr_response_tolerates_missing_pages_field() {
        let parsed: OcrResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.pages.is_empty());
        assert!(parsed.model.is_none());
    }

    #[test]
    fn file_handle_parses_upload_response() {
        let body = r#"{"id": "file-abc123", "object": "file",
                       "filename": "report.pdf", "purpose": "ocr"}"#;
        let handle: RemoteFileHandle = serde_json::from_str(body).unwrap();
        assert_eq!(handle.id, "file-abc123");
        assert_eq!(handle.filename.as_deref(), Some("report.pdf"));
    }

    #[test]
    fn base_url_trailing_slash_is_normalised() {
        let client = MistralClient::new("k", "https://api.mistral.ai/", 30).unwrap();
        assert_eq!(client.endpoint("/v1/ocr"), "https://api.mistral.ai/v1/ocr");
    }

    #[test]
    fn debug_redacts_the_api_key() {
        let client = MistralClient::new("super-secret", DEFAULT_BASE_URL, 30).unwrap();
        let dbg = format!("{client:?}");
        assert!(!dbg.contains("super-secret"));
        assert!(dbg.contains("<redacted>"));
    }
}
