//! TTS (Text-to-Speech) types.

use crate::{Error, ErrorContext, Result};
use std::fmt;

/// Voices offered by qwen-tts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Voice {
    #[default]
    Cherry,
    Serena,
    Ethan,
    Chelsie,
}

impl Voice {
    pub const ALL: [Voice; 4] = [Voice::Cherry, Voice::Serena, Voice::Ethan, Voice::Chelsie];

    /// Identifier sent to the API.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Cherry => "Cherry",
            Self::Serena => "Serena",
            Self::Ethan => "Ethan",
            Self::Chelsie => "Chelsie",
        }
    }

    /// Human-readable description for pickers.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cherry => "Intellectual female voice (Cherry)",
            Self::Serena => "Sweet female voice (Serena)",
            Self::Ethan => "Sunny young male voice (Ethan)",
            Self::Chelsie => "Elegant female voice (Chelsie)",
        }
    }

    pub fn from_code(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.code().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Supported audio formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
    Wav,
    Pcm,
}

impl AudioFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Pcm => "pcm",
        }
    }

    /// Guess from a URL or file name; qwen-tts returns wav by default.
    pub fn from_url(url: &str) -> Self {
        let path = url.split(['?', '#']).next().unwrap_or(url).to_lowercase();
        if path.ends_with(".mp3") {
            Self::Mp3
        } else if path.ends_with(".pcm") {
            Self::Pcm
        } else {
            Self::Wav
        }
    }
}

/// Options for TTS synthesis.
#[derive(Debug, Clone, PartialEq)]
pub struct TtsOptions {
    pub voice: Voice,
    /// 0.5 ..= 2.0
    pub speed: f32,
    /// 0.5 ..= 1.5
    pub pitch: f32,
}

impl Default for TtsOptions {
    fn default() -> Self {
        Self {
            voice: Voice::default(),
            speed: 1.0,
            pitch: 1.0,
        }
    }
}

impl TtsOptions {
    pub fn validate(&self) -> Result<()> {
        check_range("tts.speed", self.speed, 0.5, 2.0)?;
        check_range("tts.pitch", self.pitch, 0.5, 1.5)
    }
}

fn check_range(field: &str, value: f32, min: f32, max: f32) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(Error::validation_with_context(
            format!("{} out of range: {}", field, value),
            ErrorContext::new()
                .with_field_path(field)
                .with_details(format!("expected {}..={}", min, max))
                .with_source("speech_client"),
        ))
    }
}
