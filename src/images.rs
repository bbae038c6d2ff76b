//! Text-to-image generation (CogView on the Zhipu open platform).

use crate::config::{self, ProviderConfig};
use crate::download::{Downloader, ProgressSink};
use crate::transport::HttpTransport;
use crate::{Error, Result};
use serde_json::json;
use std::path::{Path, PathBuf};

pub struct ImageClient {
    transport: HttpTransport,
    model: String,
    size: String,
}

impl ImageClient {
    pub fn builder() -> ImageClientBuilder {
        ImageClientBuilder::new()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate one image and return its URL.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        if prompt.trim().is_empty() {
            return Err(Error::validation("image prompt is empty"));
        }
        let body = json!({
            "model": self.model,
            "prompt": prompt,
            "size": self.size,
        });
        let resp = self
            .transport
            .post_json("/images/generations", &body, &[])
            .await
            .map_err(|e| Error::generation(format!("image request failed: {}", e)))?;
        if !resp.is_success() {
            return Err(Error::generation_status(resp.status, resp.error_message()));
        }
        let json = resp
            .json()
            .map_err(|e| Error::generation(format!("malformed image reply: {}", e)))?;
        json.pointer("/data/0/url")
            .and_then(|u| u.as_str())
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .ok_or_else(|| Error::generation("image reply has no data[0].url"))
    }

    pub async fn generate_to_file(
        &self,
        prompt: &str,
        downloader: &Downloader,
        destination: impl AsRef<Path>,
        progress: &dyn ProgressSink,
    ) -> Result<PathBuf> {
        let url = self.generate(prompt).await?;
        downloader
            .download_with_progress(&url, destination, progress)
            .await
    }
}

pub struct ImageClientBuilder {
    model: Option<String>,
    size: Option<String>,
    api_key: Option<String>,
    base_url: Option<String>,
}

impl ImageClientBuilder {
    pub fn new() -> Self {
        Self {
            model: None,
            size: None,
            api_key: None,
            base_url: None,
        }
    }
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
    /// `WIDTHxHEIGHT`, e.g. `1024x1024`.
    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn build(self) -> Result<ImageClient> {
        let api_key = match self.api_key {
            Some(key) => key,
            None => config::require_var(&["ZHIPU_API_KEY", "Zhipu_API_KEY"])?,
        };
        let base_url = self
            .base_url
            .unwrap_or_else(|| config::ZHIPU_BASE_URL.to_string());
        let cfg = ProviderConfig::new(api_key, base_url);
        Ok(ImageClient {
            transport: HttpTransport::new(&cfg)?,
            model: self
                .model
                .unwrap_or_else(|| "cogView-4-250304".to_string()),
            size: self.size.unwrap_or_else(|| "1024x1024".to_string()),
        })
    }
}

impl Default for ImageClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
