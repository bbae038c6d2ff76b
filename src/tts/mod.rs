//! TTS（文字转语音）模块：通过 DashScope qwen-tts 将文本合成为音频，再下载到本地。

mod client;
mod types;

pub use client::{SpeechClient, SpeechClientBuilder};
pub use types::{AudioFormat, TtsOptions, Voice};
