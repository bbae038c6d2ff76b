//! # Types Module
//!
//! Wire-level data types shared by the chat session and the service clients.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Message`] | One role-tagged turn of a conversation |
//! | [`MessageRole`] | `system`, `user` or `assistant` |
//! | [`MessageContent`] | Plain text or a list of multimodal parts |
//! | [`ContentPart`] | Text or image part of a multimodal message |
//!
//! ## Example
//!
//! ```rust
//! use xingcan_assist::types::{Message, MessageRole};
//!
//! let system = Message::system("You are a helpful assistant");
//! let user = Message::user("What is AI?");
//! assert_eq!(system.role, MessageRole::System);
//! assert_eq!(user.text(), Some("What is AI?"));
//! ```

pub mod message;

pub use message::{ContentPart, ImageUrl, Message, MessageContent, MessageRole};
