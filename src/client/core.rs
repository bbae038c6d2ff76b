use crate::client::builder::CompletionClientBuilder;
use crate::config::ProviderConfig;
use crate::session::{ChatCompletion, ChatRequest};
use crate::transport::{HttpTransport, RawResponse};
use crate::types::{ContentPart, Message, MessageContent, MessageRole};
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::json;
use std::path::Path;
use tracing::info;

pub const DEFAULT_VISION_PROMPT: &str = "Describe the content of this image.";

/// Client for `/chat/completions` and `/completions`.
pub struct CompletionClient {
    transport: HttpTransport,
}

impl CompletionClient {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        Ok(Self {
            transport: HttpTransport::new(config)?,
        })
    }

    pub fn builder() -> CompletionClientBuilder {
        CompletionClientBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Ask a vision model about a local image.
    ///
    /// A missing or blank prompt falls back to [`DEFAULT_VISION_PROMPT`].
    pub async fn describe_image(
        &self,
        model: &str,
        image: impl AsRef<Path>,
        prompt: Option<&str>,
    ) -> Result<String> {
        let prompt = prompt
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_VISION_PROMPT);
        let image_part = ContentPart::image_from_file(image)?;
        let request = ChatRequest {
            model: model.to_string(),
            messages: vec![Message::with_content(
                MessageRole::User,
                MessageContent::parts(vec![ContentPart::text(prompt), image_part]),
            )],
            temperature: Some(0.7),
            max_tokens: None,
        };
        self.complete(&request).await
    }

    /// Plain prompt completion (`choices[0].text`), used for code generation.
    pub async fn complete_text(
        &self,
        model: &str,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<String> {
        let body = json!({
            "model": model,
            "prompt": prompt,
            "max_tokens": max_tokens,
            "temperature": 0.7,
        });
        let resp = self
            .transport
            .post_json("/completions", &body, &[])
            .await
            .map_err(|e| Error::completion(format!("completion request failed: {}", e)))?;
        let json = parse_success(&resp)?;
        json.pointer("/choices/0/text")
            .and_then(|t| t.as_str())
            .map(str::to_string)
            .ok_or_else(|| Error::completion("completion reply has no choices[0].text"))
    }
}

#[async_trait]
impl ChatCompletion for CompletionClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        let body = serde_json::to_value(request)?;
        let resp = self
            .transport
            .post_json("/chat/completions", &body, &[])
            .await
            .map_err(|e| Error::completion(format!("chat request failed: {}", e)))?;
        let json = parse_success(&resp)?;
        if let Some(usage) = json.get("usage") {
            info!(model = %request.model, usage = %usage, "chat completion");
        }
        json.pointer("/choices/0/message/content")
            .and_then(|c| c.as_str())
            .map(str::to_string)
            .ok_or_else(|| Error::completion("chat reply has no choices[0].message.content"))
    }
}

fn parse_success(resp: &RawResponse) -> Result<serde_json::Value> {
    if !resp.is_success() {
        return Err(Error::completion_status(resp.status, resp.error_message()));
    }
    resp.json()
        .map_err(|e| Error::completion(format!("malformed reply: {}", e)))
}
