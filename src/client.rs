//! OpenAI-compatible completion client.
//!
//! Backs the chat, image-understanding and code assistants. Any provider that
//! speaks the `/chat/completions` and `/completions` wire format works; the
//! defaults target the Zhipu open platform.

pub mod builder;
pub mod core;

pub use builder::CompletionClientBuilder;
pub use core::{CompletionClient, DEFAULT_VISION_PROMPT};
