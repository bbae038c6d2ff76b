use crate::client::core::CompletionClient;
use crate::config::{self, ProviderConfig};
use crate::Result;

/// Builder for [`CompletionClient`].
///
/// Unset values fall back to the Zhipu environment (`ZHIPU_API_KEY`) and
/// base URL.
pub struct CompletionClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl CompletionClientBuilder {
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: None,
            timeout_secs: None,
        }
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the base URL (e.g. DashScope compatible mode, or a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn build(self) -> Result<CompletionClient> {
        let api_key = match self.api_key {
            Some(key) => key,
            None => config::require_var(&["ZHIPU_API_KEY", "Zhipu_API_KEY"])?,
        };
        let base_url = self
            .base_url
            .unwrap_or_else(|| config::ZHIPU_BASE_URL.to_string());
        let mut cfg = ProviderConfig::new(api_key, base_url);
        if let Some(secs) = self.timeout_secs {
            cfg = cfg.with_timeout_secs(secs);
        }
        CompletionClient::new(&cfg)
    }
}

impl Default for CompletionClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
