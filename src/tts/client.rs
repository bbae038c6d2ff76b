//! TTS (Text-to-Speech) client.

use super::types::{AudioFormat, TtsOptions};
use crate::config::{self, ProviderConfig};
use crate::download::{timestamped_path, Downloader, ProgressSink};
use crate::transport::HttpTransport;
use crate::{Error, Result};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::info;

const SPEECH_PATH: &str = "/api/v1/services/aigc/multimodal-generation/generation";

/// Client for text-to-speech synthesis.
pub struct SpeechClient {
    transport: HttpTransport,
    model: String,
}

impl SpeechClient {
    pub fn builder() -> SpeechClientBuilder {
        SpeechClientBuilder::new()
    }

    /// Synthesize `text` and return the URL of the generated audio.
    pub async fn synthesize(&self, text: &str, options: &TtsOptions) -> Result<String> {
        if text.trim().is_empty() {
            return Err(Error::validation("text to synthesize is empty"));
        }
        options.validate()?;
        let body = json!({
            "model": self.model,
            "input": {
                "text": text,
                "voice": options.voice.code(),
            },
            "parameters": {
                "rate": options.speed,
                "pitch": options.pitch,
            },
        });
        let resp = self
            .transport
            .post_json(SPEECH_PATH, &body, &[])
            .await
            .map_err(|e| Error::generation(format!("TTS request failed: {}", e)))?;
        if !resp.is_success() {
            return Err(Error::generation_status(resp.status, resp.error_message()));
        }
        let json = resp
            .json()
            .map_err(|e| Error::generation(format!("malformed TTS reply: {}", e)))?;
        json.pointer("/output/audio/url")
            .and_then(|u| u.as_str())
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .ok_or_else(|| Error::generation("TTS reply has no audio URL"))
    }

    /// Synthesize and download the audio. Without an explicit destination the
    /// file lands in `result/T2A/output{timestamp}.{ext}`.
    pub async fn synthesize_to_file(
        &self,
        text: &str,
        options: &TtsOptions,
        downloader: &Downloader,
        destination: Option<&Path>,
        progress: &dyn ProgressSink,
    ) -> Result<PathBuf> {
        let url = self.synthesize(text, options).await?;
        let destination = match destination {
            Some(path) => path.to_path_buf(),
            None => timestamped_path(
                "result/T2A",
                "output",
                AudioFormat::from_url(&url).extension(),
            ),
        };
        let path = downloader
            .download_with_progress(&url, &destination, progress)
            .await?;
        info!(voice = %options.voice, path = %path.display(), "speech saved");
        Ok(path)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

pub struct SpeechClientBuilder {
    model: Option<String>,
    api_key: Option<String>,
    base_url: Option<String>,
    timeout_secs: u64,
}

impl SpeechClientBuilder {
    pub fn new() -> Self {
        Self {
            model: None,
            api_key: None,
            base_url: None,
            timeout_secs: 60,
        }
    }
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
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
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn build(self) -> Result<SpeechClient> {
        let model = self.model.unwrap_or_else(|| "qwen-tts".to_string());
        let api_key = match self.api_key {
            Some(key) => key,
            None => config::require_var(&["DASHSCOPE_API_KEY"])?,
        };
        let base_url = self
            .base_url
            .unwrap_or_else(|| config::DASHSCOPE_BASE_URL.to_string());
        let cfg = ProviderConfig::new(api_key, base_url).with_timeout_secs(self.timeout_secs);
        Ok(SpeechClient {
            transport: HttpTransport::new(&cfg)?,
            model,
        })
    }
}

impl Default for SpeechClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
