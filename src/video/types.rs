use crate::{Error, ErrorContext, Result};
use std::fmt;

/// Resolutions accepted by wan2.2-t2v-plus, as `width*height`.
pub const VIDEO_SIZES: [&str; 5] = ["1920*1080", "1280*720", "1024*1024", "720*1280", "1080*1920"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoSize {
    pub width: u32,
    pub height: u32,
}

impl VideoSize {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if !VIDEO_SIZES.contains(&s) {
            return Err(Error::validation_with_context(
                format!("unsupported video size '{}'", s),
                ErrorContext::new()
                    .with_field_path("video.size")
                    .with_details(format!("expected one of {}", VIDEO_SIZES.join(", ")))
                    .with_source("video_client"),
            ));
        }
        let (w, h) = s
            .split_once('*')
            .ok_or_else(|| Error::validation(format!("malformed video size '{}'", s)))?;
        let parse = |v: &str| {
            v.parse::<u32>()
                .map_err(|e| Error::validation(format!("malformed video size '{}': {}", s, e)))
        };
        Ok(Self {
            width: parse(w)?,
            height: parse(h)?,
        })
    }
}

impl Default for VideoSize {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

impl fmt::Display for VideoSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}*{}", self.width, self.height)
    }
}

/// Lifecycle of an asynchronous generation task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
    Canceled,
    Unknown,
}

impl TaskStatus {
    pub fn from_api(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Self::Pending,
            "RUNNING" => Self::Running,
            "SUCCEEDED" => Self::Succeeded,
            "FAILED" => Self::Failed,
            "CANCELED" => Self::Canceled,
            _ => Self::Unknown,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending | Self::Running)
    }
}
