use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or setting that caused the error (e.g., "tts.speed", "env.DASHSCOPE_API_KEY")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., accepted range, actual value)
    pub details: Option<String>,
    /// Component that raised the error (e.g., "downloader", "speech_client")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the assistants.
///
/// Transfer and I/O failures are kept apart so callers can treat a flaky
/// remote differently from a full disk.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Transfer error{}: {message}", format_status(.status))]
    Transfer {
        status: Option<u16>,
        message: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Completion error{}: {message}", format_status(.status))]
    Completion {
        status: Option<u16>,
        message: String,
    },

    #[error("Generation error{}: {message}", format_status(.status))]
    Generation {
        status: Option<u16>,
        message: String,
    },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn format_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (HTTP {})", code),
        None => String::new(),
    }
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn transfer(msg: impl Into<String>) -> Self {
        Error::Transfer {
            status: None,
            message: msg.into(),
        }
    }

    pub fn transfer_status(status: u16, msg: impl Into<String>) -> Self {
        Error::Transfer {
            status: Some(status),
            message: msg.into(),
        }
    }

    pub fn completion(msg: impl Into<String>) -> Self {
        Error::Completion {
            status: None,
            message: msg.into(),
        }
    }

    pub fn completion_status(status: u16, msg: impl Into<String>) -> Self {
        Error::Completion {
            status: Some(status),
            message: msg.into(),
        }
    }

    pub fn generation(msg: impl Into<String>) -> Self {
        Error::Generation {
            status: None,
            message: msg.into(),
        }
    }

    pub fn generation_status(status: u16, msg: impl Into<String>) -> Self {
        Error::Generation {
            status: Some(status),
            message: msg.into(),
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::configuration_with_context(msg, ErrorContext::new())
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::validation_with_context(msg, ErrorContext::new())
    }

    /// Create a new validation error with structured context
    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    /// HTTP status attached to a remote failure, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Transfer { status, .. }
            | Error::Completion { status, .. }
            | Error::Generation { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_transfer(&self) -> bool {
        matches!(self, Error::Transfer { .. })
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_))
    }

    pub fn is_completion(&self) -> bool {
        matches!(self, Error::Completion { .. })
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } | Error::Validation { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }
}
