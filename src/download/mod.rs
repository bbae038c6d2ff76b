//! Streaming download with progress reporting.
//!
//! Generation APIs answer with a URL; [`Downloader`] materialises it on disk
//! chunk by chunk, reporting each chunk through a [`ProgressSink`].
//!
//! ```rust,no_run
//! use xingcan_assist::download::{Downloader, LogProgress};
//!
//! # async fn run() -> xingcan_assist::Result<()> {
//! let downloader = Downloader::new()?;
//! let path = downloader
//!     .download_with_progress("https://example.com/a.wav", "result/T2A/a.wav", &LogProgress::new("a.wav"))
//!     .await?;
//! println!("saved to {}", path.display());
//! # Ok(())
//! # }
//! ```

mod downloader;
mod progress;

pub use downloader::{timestamped_path, Downloader, DownloaderBuilder, DEFAULT_CHUNK_SIZE};
pub use progress::{DownloadProgress, LogProgress, NoProgress, ProgressSink};
