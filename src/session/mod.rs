//! Multi-turn chat state.
//!
//! Completion endpoints are stateless, so a [`ChatSession`] replays its whole
//! [`ConversationLog`] on every call.

mod chat;
mod log;

pub use chat::{ChatCompletion, ChatOptions, ChatRequest, ChatSession, DEFAULT_SYSTEM_PROMPT};
pub use log::ConversationLog;
