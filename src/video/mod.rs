//! Text-to-video generation through DashScope's asynchronous task API.

mod client;
mod types;

pub use client::{VideoClient, VideoClientBuilder};
pub use types::{TaskStatus, VideoSize, VIDEO_SIZES};
