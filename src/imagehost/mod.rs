//! Image upload coordination
//!
//! Binary image storage is delegated to an external hosting service over
//! HTTPS. The coordinator uploads the bytes, and hands back the hosted URL
//! plus an opaque deletion handle the admin surface stores alongside the
//! content entity. Nothing is retried automatically: a failed upload is
//! reported and the caller must re-initiate, and no content record may be
//! persisted on the strength of a failed upload.
//!
//! `ImageHost` is the seam the API layer depends on; `HttpImageHost` is the
//! production implementation speaking the host's multipart API.

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ImageHostConfig;

/// A successfully hosted image
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Public URL of the full-size image
    pub url: String,
    /// Opaque handle for out-of-band deletion
    pub delete_url: String,
    /// Thumbnail URL; falls back to the full-size URL when the host
    /// produces none
    pub thumb_url: String,
}

/// Errors surfaced by the image host
#[derive(Debug, thiserror::Error)]
pub enum ImageHostError {
    /// The host was reached but refused the upload
    #[error("Image host rejected the upload: {0}")]
    Rejected(String),

    /// Network failure, timeout, or unusable response
    #[error("Image host request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service is not configured with an API key
    #[error("Image host API key is not configured")]
    MissingApiKey,
}

/// Seam for binary image storage
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Upload raw image bytes, returning the hosted URLs
    async fn upload(&self, bytes: Vec<u8>, filename: &str) -> Result<UploadedImage, ImageHostError>;

    /// Delete a previously uploaded image via its deletion handle
    async fn delete(&self, delete_url: &str) -> Result<(), ImageHostError>;
}

/// Type alias for an injected image host
pub type DynImageHost = Arc<dyn ImageHost>;

// ============================================================================
// Host wire format
// ============================================================================

/// Envelope returned by the hosting service
#[derive(Debug, Deserialize)]
struct HostResponse {
    #[serde(default)]
    success: bool,
    data: Option<HostImageData>,
    error: Option<HostError>,
}

#[derive(Debug, Deserialize)]
struct HostImageData {
    url: String,
    delete_url: String,
    thumb: Option<HostThumb>,
}

#[derive(Debug, Deserialize)]
struct HostThumb {
    url: String,
}

#[derive(Debug, Deserialize)]
struct HostError {
    message: Option<String>,
}

// ============================================================================
// HTTP implementation
// ============================================================================

/// reqwest-backed image host client
pub struct HttpImageHost {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpImageHost {
    /// Build a client from configuration; the timeout applies per request
    pub fn new(config: &ImageHostConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Boxed client for dependency injection
    pub fn boxed(config: &ImageHostConfig) -> anyhow::Result<DynImageHost> {
        Ok(Arc::new(Self::new(config)?))
    }
}

#[async_trait]
impl ImageHost for HttpImageHost {
    async fn upload(&self, bytes: Vec<u8>, filename: &str) -> Result<UploadedImage, ImageHostError> {
        if self.api_key.is_empty() {
            return Err(ImageHostError::MissingApiKey);
        }

        let part = multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = multipart::Form::new().part("image", part);

        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body: HostResponse = response.json().await?;

        if !status.is_success() || !body.success {
            let message = body
                .error
                .and_then(|e| e.message)
                .unwrap_or_else(|| format!("status {status}"));
            tracing::warn!("Image upload rejected: {}", message);
            return Err(ImageHostError::Rejected(message));
        }

        let data = body
            .data
            .ok_or_else(|| ImageHostError::Rejected("response carried no image data".into()))?;

        let thumb_url = data.thumb.map(|t| t.url).unwrap_or_else(|| data.url.clone());
        Ok(UploadedImage {
            url: data.url,
            delete_url: data.delete_url,
            thumb_url,
        })
    }

    async fn delete(&self, delete_url: &str) -> Result<(), ImageHostError> {
        let response = self.http.delete(delete_url).send().await?;
        if !response.status().is_success() {
            return Err(ImageHostError::Rejected(format!(
                "delete returned status {}",
                response.status()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_response_parses_full_envelope() {
        let raw = r#"{
            "success": true,
            "status": 200,
            "data": {
                "url": "https://i.example.com/full.jpg",
                "delete_url": "https://example.com/delete/abc",
                "thumb": { "url": "https://i.example.com/thumb.jpg" }
            }
        }"#;

        let parsed: HostResponse = serde_json::from_str(raw).unwrap();
        assert!(parsed.success);
        let data = parsed.data.unwrap();
        assert_eq!(data.url, "https://i.example.com/full.jpg");
        assert_eq!(data.thumb.unwrap().url, "https://i.example.com/thumb.jpg");
    }

    #[test]
    fn test_host_response_parses_error_envelope() {
        let raw = r#"{
            "success": false,
            "error": { "message": "Invalid API key", "code": 100 }
        }"#;

        let parsed: HostResponse = serde_json::from_str(raw).unwrap();
        assert!(!parsed.success);
        assert_eq!(parsed.error.unwrap().message.as_deref(), Some("Invalid API key"));
    }

    #[test]
    fn test_thumb_is_optional() {
        let raw = r#"{
            "success": true,
            "data": {
                "url": "https://i.example.com/full.jpg",
                "delete_url": "https://example.com/delete/abc"
            }
        }"#;

        let parsed: HostResponse = serde_json::from_str(raw).unwrap();
        assert!(parsed.data.unwrap().thumb.is_none());
    }

    #[tokio::test]
    async fn test_upload_without_api_key_fails_fast() {
        let host = HttpImageHost::new(&ImageHostConfig::default()).unwrap();
        let err = host.upload(vec![1, 2, 3], "x.jpg").await.unwrap_err();
        assert!(matches!(err, ImageHostError::MissingApiKey));
    }
}
