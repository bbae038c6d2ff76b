//! Buffered HTTP GET written to disk as it arrives.

use super::progress::{DownloadProgress, NoProgress, ProgressSink};
use crate::transport::client_builder;
use crate::{Error, ErrorContext, Result};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use url::Url;

/// Granularity of progress updates, in bytes.
pub const DEFAULT_CHUNK_SIZE: usize = 512;

pub struct Downloader {
    http_client: reqwest::Client,
    chunk_size: usize,
}

impl Downloader {
    pub fn new() -> Result<Self> {
        DownloaderBuilder::new().build()
    }

    pub fn builder() -> DownloaderBuilder {
        DownloaderBuilder::new()
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub async fn download(&self, url: &str, destination: impl AsRef<Path>) -> Result<PathBuf> {
        self.download_with_progress(url, destination, &NoProgress).await
    }

    /// Fetch `url` into `destination`, creating missing parent directories.
    ///
    /// A non-success status fails before the filesystem is touched. A failure
    /// after the first write may leave a partial file behind; its content is
    /// unspecified.
    pub async fn download_with_progress(
        &self,
        url: &str,
        destination: impl AsRef<Path>,
        progress: &dyn ProgressSink,
    ) -> Result<PathBuf> {
        let destination = destination.as_ref();
        let url = parse_http_url(url)?;

        let response = self
            .http_client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::transfer(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::transfer_status(
                status.as_u16(),
                format!("GET {} returned {}", url, status),
            ));
        }

        let total = response.content_length();
        debug!(%url, ?total, dest = %destination.display(), "starting download");

        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let mut file = fs::File::create(destination).await?;

        progress.on_start(total);
        let mut transferred: u64 = 0;
        let mut body = response.bytes_stream();
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| {
                warn!(%url, transferred, "download interrupted: {}", e);
                Error::transfer(format!("reading body of {} failed: {}", url, e))
            })?;
            for piece in chunk.chunks(self.chunk_size) {
                let next = transferred + piece.len() as u64;
                if let Some(total) = total {
                    if next > total {
                        return Err(Error::transfer(format!(
                            "body of {} exceeds announced length {}",
                            url, total
                        )));
                    }
                }
                file.write_all(piece).await?;
                transferred = next;
                progress.on_progress(DownloadProgress { transferred, total });
            }
        }
        file.flush().await?;

        if let Some(total) = total {
            if transferred < total {
                return Err(Error::transfer(format!(
                    "body of {} truncated: {} of {} bytes",
                    url, transferred, total
                )));
            }
        }

        progress.on_finish(DownloadProgress { transferred, total });
        Ok(destination.to_path_buf())
    }
}

fn parse_http_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| {
        Error::validation_with_context(
            format!("invalid download URL: {}", e),
            ErrorContext::new()
                .with_field_path("url")
                .with_details(raw.to_string())
                .with_source("downloader"),
        )
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::validation_with_context(
            format!("unsupported URL scheme '{}'", other),
            ErrorContext::new()
                .with_field_path("url")
                .with_details("expected http or https")
                .with_source("downloader"),
        )),
    }
}

/// `dir/prefix{unix_seconds}.ext`, the default naming for generated media.
pub fn timestamped_path(dir: impl AsRef<Path>, prefix: &str, extension: &str) -> PathBuf {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let extension = extension.trim_start_matches('.');
    dir.as_ref().join(format!("{}{}.{}", prefix, secs, extension))
}

pub struct DownloaderBuilder {
    chunk_size: usize,
    connect_timeout: Duration,
    timeout: Option<Duration>,
}

impl DownloaderBuilder {
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            connect_timeout: Duration::from_secs(30),
            timeout: None,
        }
    }

    pub fn chunk_size(mut self, bytes: usize) -> Self {
        self.chunk_size = bytes;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Overall deadline for one transfer. Unbounded by default since video
    /// files can be large.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<Downloader> {
        if self.chunk_size == 0 {
            return Err(Error::configuration_with_context(
                "chunk size must be positive",
                ErrorContext::new()
                    .with_field_path("downloader.chunk_size")
                    .with_source("downloader"),
            ));
        }
        let mut builder = client_builder().connect_timeout(self.connect_timeout);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Downloader {
            http_client,
            chunk_size: self.chunk_size,
        })
    }
}

impl Default for DownloaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}
