//! # xingcan-assist
//!
//! 星灿助手核心库：多轮对话状态、带进度的流式下载，以及各类托管 AI 服务客户端。
//!
//! Core of the Xingcan assistants: multi-turn chat state, streaming media
//! downloads with progress, and thin clients for hosted AI services.
//!
//! ## Overview
//!
//! Two leaf components carry the actual logic:
//!
//! - **Chat sessions**: [`ChatSession`] keeps an append-only
//!   [`ConversationLog`] with a fixed system turn and replays it in full on
//!   every call, since completion endpoints are stateless.
//! - **Downloads**: [`Downloader`] streams a URL to disk chunk by chunk and
//!   reports progress through a [`ProgressSink`].
//!
//! The service clients ([`CompletionClient`], [`images::ImageClient`],
//! [`tts::SpeechClient`], [`video::VideoClient`]) compose them.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use xingcan_assist::{ChatOptions, ChatSession, CompletionClient};
//!
//! #[tokio::main]
//! async fn main() -> xingcan_assist::Result<()> {
//!     let client = CompletionClient::builder().api_key("your-api-key").build()?;
//!     let mut session = ChatSession::new(client, ChatOptions::default());
//!
//!     let reply = session.send("What is AI?").await?;
//!     println!("{}", reply);
//!     session.reset();
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`session`] | Conversation log and chat session |
//! | [`download`] | Streaming downloader and progress sinks |
//! | [`client`] | OpenAI-compatible chat, vision and text completion |
//! | [`images`] | Text-to-image generation |
//! | [`tts`] | Text-to-speech synthesis |
//! | [`video`] | Text-to-video generation |
//! | [`config`] | Credentials and endpoints from the environment |
//! | [`transport`] | Shared HTTP plumbing |
//! | [`types`] | Message types |

pub mod client;
pub mod config;
pub mod download;
pub mod images;
pub mod session;
pub mod transport;
pub mod tts;
pub mod types;
pub mod video;

// Re-export main types for convenience
pub use client::CompletionClient;
pub use config::ProviderConfig;
pub use download::{DownloadProgress, Downloader, ProgressSink};
pub use session::{ChatCompletion, ChatOptions, ChatRequest, ChatSession, ConversationLog};
pub use types::message::{Message, MessageRole};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
