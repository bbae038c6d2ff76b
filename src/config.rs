//! Provider credentials and endpoints resolved from the environment.

use crate::{Error, ErrorContext, Result};
use std::env;

pub const ZHIPU_BASE_URL: &str = "https://open.bigmodel.cn/api/paas/v4";
pub const DASHSCOPE_BASE_URL: &str = "https://dashscope.aliyuncs.com";
pub const DASHSCOPE_COMPATIBLE_BASE_URL: &str = "https://dashscope.aliyuncs.com/compatible-mode/v1";

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Static bearer credential plus the base URL it is valid for.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ProviderConfig {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            timeout_secs: timeout_from_env(),
        }
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Zhipu open platform (chat, vision, image generation).
    pub fn zhipu_from_env() -> Result<Self> {
        let api_key = require_var(&["ZHIPU_API_KEY", "Zhipu_API_KEY"])?;
        Ok(Self::new(api_key, ZHIPU_BASE_URL))
    }

    /// DashScope native API (speech and video synthesis).
    pub fn dashscope_from_env() -> Result<Self> {
        let api_key = require_var(&["DASHSCOPE_API_KEY"])?;
        Ok(Self::new(api_key, DASHSCOPE_BASE_URL))
    }

    /// DashScope OpenAI-compatible mode (code completion).
    pub fn dashscope_compatible_from_env() -> Result<Self> {
        let api_key = require_var(&["DASHSCOPE_API_KEY"])?;
        let base_url = first_var(&["DASHSCOPE_BASE_URL", "DASHSCOPE_base_url"])
            .unwrap_or_else(|| DASHSCOPE_COMPATIBLE_BASE_URL.to_string());
        Ok(Self::new(api_key, base_url))
    }
}

/// Request timeout, overridable through `AI_HTTP_TIMEOUT_SECS`.
pub fn timeout_from_env() -> u64 {
    env::var("AI_HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_TIMEOUT_SECS)
}

fn first_var(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}

pub(crate) fn require_var(names: &[&str]) -> Result<String> {
    first_var(names).ok_or_else(|| {
        Error::configuration_with_context(
            format!("{} is not set", names[0]),
            ErrorContext::new()
                .with_field_path(format!("env.{}", names[0]))
                .with_source("config"),
        )
    })
}
