//! Progress side channel for downloads.

use tracing::{debug, info};

/// Snapshot emitted after each chunk is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadProgress {
    pub transferred: u64,
    /// `None` when the server did not send a content-length.
    pub total: Option<u64>,
}

impl DownloadProgress {
    pub fn fraction(&self) -> Option<f64> {
        match self.total {
            Some(0) => Some(1.0),
            Some(total) => Some(self.transferred as f64 / total as f64),
            None => None,
        }
    }

    pub fn percent(&self) -> Option<u8> {
        self.fraction().map(|f| (f * 100.0).floor().min(100.0) as u8)
    }
}

/// Receives download progress. Implementations must be cheap; they run
/// inline between chunk writes.
pub trait ProgressSink: Send + Sync {
    fn on_start(&self, _total: Option<u64>) {}

    fn on_progress(&self, progress: DownloadProgress);

    fn on_finish(&self, _progress: DownloadProgress) {}
}

impl<F> ProgressSink for F
where
    F: Fn(DownloadProgress) + Send + Sync,
{
    fn on_progress(&self, progress: DownloadProgress) {
        self(progress)
    }
}

/// Discards every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_progress(&self, _progress: DownloadProgress) {}
}

/// Reports progress through `tracing`.
#[derive(Debug, Clone)]
pub struct LogProgress {
    label: String,
}

impl LogProgress {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl ProgressSink for LogProgress {
    fn on_start(&self, total: Option<u64>) {
        info!(target: "download", label = %self.label, ?total, "download started");
    }

    fn on_progress(&self, progress: DownloadProgress) {
        match progress.percent() {
            Some(pct) => debug!(
                target: "download",
                label = %self.label,
                transferred = progress.transferred,
                total = progress.total,
                "{}%",
                pct
            ),
            None => debug!(
                target: "download",
                label = %self.label,
                transferred = progress.transferred,
                "size unknown"
            ),
        }
    }

    fn on_finish(&self, progress: DownloadProgress) {
        info!(
            target: "download",
            label = %self.label,
            bytes = progress.transferred,
            "download complete"
        );
    }
}
