use super::log::ConversationLog;
use crate::types::Message;
use crate::Result;
use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

/// English rendering of the Chinese assistants' prompt "你是一个有用的AI助手".
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant.";

/// One stateless completion call: full context plus sampling options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// A hosted chat model. Returns the assistant's reply text.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<String>;
}

#[async_trait]
impl<T: ChatCompletion + ?Sized> ChatCompletion for std::sync::Arc<T> {
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        (**self).complete(request).await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatOptions {
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl ChatOptions {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: Some(0.7),
            max_tokens: None,
        }
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self::new("glm-4-air-250414")
    }
}

/// A conversation bound to one completion backend.
///
/// `send` takes `&mut self`; share a session across tasks only behind a
/// mutex.
pub struct ChatSession<C> {
    client: C,
    options: ChatOptions,
    log: ConversationLog,
}

impl<C: ChatCompletion> ChatSession<C> {
    pub fn new(client: C, options: ChatOptions) -> Self {
        Self::with_system_prompt(client, options, DEFAULT_SYSTEM_PROMPT)
    }

    pub fn with_system_prompt(
        client: C,
        options: ChatOptions,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            client,
            options,
            log: ConversationLog::new(system_prompt),
        }
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn options(&self) -> &ChatOptions {
        &self.options
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Send one user turn with the full history and record the reply.
    ///
    /// The log only changes once a reply has arrived, so a failed or
    /// cancelled call leaves it exactly as it was.
    pub async fn send(&mut self, user_text: &str) -> Result<String> {
        let mut messages = Vec::with_capacity(self.log.len() + 1);
        messages.extend_from_slice(self.log.turns());
        messages.push(Message::user(user_text));
        let request = ChatRequest {
            model: self.options.model.clone(),
            messages,
            temperature: self.options.temperature,
            max_tokens: self.options.max_tokens,
        };
        debug!(
            model = %request.model,
            turns = request.messages.len(),
            "sending chat request"
        );
        let reply = self.client.complete(&request).await?;
        self.log.record_exchange(user_text, reply.clone());
        Ok(reply)
    }

    /// Like [`send`](Self::send), but turns a failure into an apology line
    /// for display ("抱歉，我遇到了一个错误" in the Chinese front-ends). The
    /// error is still logged.
    pub async fn send_or_apologize(&mut self, user_text: &str) -> String {
        match self.send(user_text).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("chat exchange failed: {}", e);
                format!("Sorry, I ran into an error: {}", e)
            }
        }
    }

    pub fn reset(&mut self) {
        self.log.reset();
    }
}
