use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Local;
use reqwest::Client;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, SdError};
use crate::types::{GenerationOptions, Txt2ImgPayload};

/// Default WebUI endpoint when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:7860";

/// Directory generated images are written to, relative to the working
/// directory, unless overridden with [`SdClient::with_output_dir`].
pub const DEFAULT_OUTPUT_DIR: &str = "generated_images";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn normalize(endpoint: String) -> String {
    endpoint.trim_end_matches('/').to_string()
}

/// Async client for a Stable Diffusion WebUI instance.
///
/// Performs exactly one generation round trip per [`SdClient::txt2img`]
/// call and persists the resulting image under the output directory. No
/// state is retained between calls; each call is independent and safe to
/// repeat.
///
/// # Example
/// ```no_run
/// use sdwebui_rs::{GenerationOptions, SdClient};
///
/// # async fn example() -> sdwebui_rs::Result<()> {
/// let client = SdClient::new("http://127.0.0.1:7860");
/// let path = client
///     .txt2img("a dragon over a burning city", "blurry", &GenerationOptions::new())
///     .await?;
/// println!("Saved: {}", path.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SdClient {
    http: Client,
    endpoint: String,
    output_dir: PathBuf,
}

impl Default for SdClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl SdClient {
    /// Create a new client pointing at the given WebUI endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: normalize(endpoint.into()),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }

    /// Use a custom `reqwest::Client` (for connection pooling, proxies, TLS).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// Change where generated images are written.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Returns the configured endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the configured output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    // ── Health ──────────────────────────────────────────────────────

    /// Check whether the WebUI is reachable via `/internal/ping`.
    pub async fn health(&self) -> Result<bool> {
        let url = format!("{}/internal/ping", self.endpoint);
        let resp = self
            .http
            .get(&url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .map_err(|e| SdError::Network {
                context: format!(
                    "Cannot connect to Stable Diffusion WebUI at {} \u{2014} is the service running?",
                    self.endpoint
                ),
                source: e,
            })?;
        Ok(resp.status().is_success())
    }

    // ── Generation ──────────────────────────────────────────────────

    /// Generate one image and persist it.
    ///
    /// Merges the fixed defaults with `options`, then sets `prompt` and
    /// `negative_prompt` unconditionally from the explicit arguments.
    /// Issues a single `POST /sdapi/v1/txt2img` with a 30-second timeout
    /// and no retries, decodes the first entry of the response's `images`
    /// array, and writes it to
    /// `<output_dir>/image_<YYYYMMDD-HHMMSS>.png`.
    ///
    /// Two calls within the same wall-clock second produce the same
    /// filename; no collision detection is performed.
    ///
    /// # Errors
    ///
    /// Any transport failure, non-2xx status, malformed or image-less
    /// response body, bad base64, or filesystem failure is returned as an
    /// [`SdError`]. Nothing panics past this boundary.
    pub async fn txt2img(
        &self,
        prompt: &str,
        negative_prompt: &str,
        options: &GenerationOptions,
    ) -> Result<PathBuf> {
        let payload = Txt2ImgPayload::merged(prompt, negative_prompt, options);
        let url = format!("{}/sdapi/v1/txt2img", self.endpoint);

        let resp = self
            .http
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .json(&payload)
            .send()
            .await
            .map_err(|e| SdError::Network {
                context: format!(
                    "Cannot connect to Stable Diffusion WebUI at {} \u{2014} is the service running?",
                    self.endpoint
                ),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(SdError::Http { status, body });
        }

        let json: Value = resp.json().await.map_err(|e| SdError::Network {
            context: "Failed to parse txt2img response".into(),
            source: e,
        })?;

        let image_b64 = extract_first_image(&json)?;
        let bytes = BASE64.decode(image_b64)?;
        self.persist_image(&bytes)
    }

    fn persist_image(&self, bytes: &[u8]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;
        let timestamp = Local::now().format("%Y%m%d-%H%M%S");
        let path = self.output_dir.join(format!("image_{}.png", timestamp));
        std::fs::write(&path, bytes)?;
        Ok(path)
    }

    // ── Model discovery ─────────────────────────────────────────────

    /// List available sampler names from `/sdapi/v1/samplers`, for
    /// populating an advanced-options selector.
    pub async fn samplers(&self) -> Result<Vec<String>> {
        let url = format!("{}/sdapi/v1/samplers", self.endpoint);
        let resp = self
            .http
            .get(&url)
            .timeout(Duration::from_secs(10))
            .send()
            .await
            .map_err(|e| SdError::Network {
                context: format!(
                    "Cannot connect to Stable Diffusion WebUI at {} \u{2014} is the service running?",
                    self.endpoint
                ),
                source: e,
            })?;

        if !resp.status().is_success() {
            return Ok(Vec::new());
        }

        let json: Value = resp.json().await.map_err(|e| SdError::Network {
            context: "Failed to parse samplers response".into(),
            source: e,
        })?;

        Ok(json
            .as_array()
            .map(|arr| {
                arr.iter()
                    .filter_map(|s| s.get("name").and_then(|n| n.as_str()).map(String::from))
                    .collect()
            })
            .unwrap_or_default())
    }
}

/// Pull the first base64 image out of a txt2img response body.
fn extract_first_image(json: &Value) -> Result<&str> {
    let images = json
        .get("images")
        .and_then(|v| v.as_array())
        .ok_or_else(|| SdError::InvalidResponse("Response missing images field".into()))?;
    images
        .first()
        .and_then(|v| v.as_str())
        .ok_or(SdError::NoImages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_endpoint() {
        assert_eq!(normalize("http://localhost:7860/".into()), "http://localhost:7860");
        assert_eq!(normalize("http://localhost:7860".into()), "http://localhost:7860");
        assert_eq!(normalize("http://host:7860///".into()), "http://host:7860");
    }

    #[test]
    fn test_client_builder() {
        let client = SdClient::new("http://127.0.0.1:7860/").with_output_dir("out");
        assert_eq!(client.endpoint(), "http://127.0.0.1:7860");
        assert_eq!(client.output_dir(), Path::new("out"));
    }

    #[test]
    fn test_default_client() {
        let client = SdClient::default();
        assert_eq!(client.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(client.output_dir(), Path::new(DEFAULT_OUTPUT_DIR));
    }

    #[test]
    fn test_extract_first_image() {
        let json: Value = serde_json::from_str(r#"{"images": ["aGVsbG8="], "info": "{}"}"#).unwrap();
        assert_eq!(extract_first_image(&json).unwrap(), "aGVsbG8=");
    }

    #[test]
    fn test_extract_missing_images_field() {
        let json: Value = serde_json::from_str(r#"{"detail": "oops"}"#).unwrap();
        let err = extract_first_image(&json).unwrap_err();
        assert!(matches!(err, SdError::InvalidResponse(_)));
    }

    #[test]
    fn test_extract_empty_images_array() {
        let json: Value = serde_json::from_str(r#"{"images": []}"#).unwrap();
        let err = extract_first_image(&json).unwrap_err();
        assert!(matches!(err, SdError::NoImages));
    }

    #[test]
    fn test_persist_image_creates_dir_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let client = SdClient::new(DEFAULT_ENDPOINT).with_output_dir(dir.path().join("imgs"));

        let path = client.persist_image(b"png bytes").unwrap();
        assert!(path.exists());
        assert_eq!(std::fs::read(&path).unwrap(), b"png bytes");

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("image_"));
        assert!(name.ends_with(".png"));
        // image_YYYYMMDD-HHMMSS.png
        assert_eq!(name.len(), "image_00000000-000000.png".len());
    }
}
