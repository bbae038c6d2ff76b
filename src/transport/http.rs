use crate::config::ProviderConfig;
use crate::{Error, Result};
use reqwest::Proxy;
use std::env;
use std::time::Duration;
use tracing::debug;

/// Base `reqwest` builder with the env-overridable defaults every client shares.
pub fn client_builder() -> reqwest::ClientBuilder {
    let mut builder = reqwest::Client::builder()
        .pool_max_idle_per_host(
            env::var("AI_HTTP_POOL_MAX_IDLE_PER_HOST")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(8),
        )
        .pool_idle_timeout(Some(Duration::from_secs(90)));

    if let Ok(proxy_url) = env::var("AI_PROXY_URL") {
        if let Ok(proxy) = Proxy::all(&proxy_url) {
            builder = builder.proxy(proxy);
        }
    }
    builder
}

/// Status and body of a completed request, before any interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }

    /// Best-effort error text: `error.message` (OpenAI style), `message`
    /// (DashScope style), or the raw body.
    pub fn error_message(&self) -> String {
        if let Ok(v) = self.json() {
            let msg = v
                .pointer("/error/message")
                .or_else(|| v.get("message"))
                .and_then(|m| m.as_str());
            if let Some(msg) = msg {
                return msg.to_string();
            }
        }
        self.body.trim().to_string()
    }
}

/// Bearer-authenticated JSON transport bound to one provider.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpTransport {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = client_builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
        headers: &[(&str, &str)],
    ) -> std::result::Result<RawResponse, TransportError> {
        let url = self.endpoint(path);
        debug!(%url, "POST");
        let mut request = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        Self::finish(request).await
    }

    pub async fn get_json(&self, path: &str) -> std::result::Result<RawResponse, TransportError> {
        let url = self.endpoint(path);
        debug!(%url, "GET");
        let request = self.client.get(&url).bearer_auth(&self.api_key);
        Self::finish(request).await
    }

    async fn finish(
        request: reqwest::RequestBuilder,
    ) -> std::result::Result<RawResponse, TransportError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
