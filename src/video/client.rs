use super::types::{TaskStatus, VideoSize};
use crate::config::{self, ProviderConfig};
use crate::download::{timestamped_path, Downloader, ProgressSink};
use crate::transport::{HttpTransport, RawResponse};
use crate::{Error, Result};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

const SYNTHESIS_PATH: &str = "/api/v1/services/aigc/video-generation/video-synthesis";

/// Client for text-to-video synthesis.
///
/// Generation is asynchronous on the server side: [`VideoClient::generate`]
/// submits a task and polls it until it reaches a terminal state.
pub struct VideoClient {
    transport: HttpTransport,
    model: String,
    poll_interval: Duration,
    max_wait: Duration,
}

impl VideoClient {
    pub fn builder() -> VideoClientBuilder {
        VideoClientBuilder::new()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Submit a generation task and return its id.
    pub async fn submit(&self, prompt: &str, size: VideoSize) -> Result<String> {
        if prompt.trim().is_empty() {
            return Err(Error::validation("video prompt is empty"));
        }
        let body = json!({
            "model": self.model,
            "input": { "prompt": prompt },
            "parameters": { "size": size.to_string() },
        });
        let resp = self
            .transport
            .post_json(SYNTHESIS_PATH, &body, &[("X-DashScope-Async", "enable")])
            .await
            .map_err(|e| Error::generation(format!("video request failed: {}", e)))?;
        let json = parse_success(&resp)?;
        let task_id = json
            .pointer("/output/task_id")
            .and_then(|t| t.as_str())
            .ok_or_else(|| Error::generation("video reply has no task id"))?;
        info!(task_id, %size, "video task submitted");
        Ok(task_id.to_string())
    }

    /// Current status of a task, plus the video URL once it succeeded.
    pub async fn status(&self, task_id: &str) -> Result<(TaskStatus, Option<String>)> {
        let resp = self
            .transport
            .get_json(&format!("/api/v1/tasks/{}", task_id))
            .await
            .map_err(|e| Error::generation(format!("task query failed: {}", e)))?;
        let json = parse_success(&resp)?;
        let status = json
            .pointer("/output/task_status")
            .and_then(|s| s.as_str())
            .map(TaskStatus::from_api)
            .unwrap_or(TaskStatus::Unknown);
        if status == TaskStatus::Succeeded {
            let url = json
                .pointer("/output/video_url")
                .and_then(|u| u.as_str())
                .filter(|u| !u.is_empty())
                .ok_or_else(|| Error::generation("finished task has no video URL"))?;
            return Ok((status, Some(url.to_string())));
        }
        if status.is_terminal() {
            let reason = json
                .pointer("/output/message")
                .or_else(|| json.pointer("/output/code"))
                .and_then(|m| m.as_str())
                .unwrap_or("no reason given");
            return Err(Error::generation(format!(
                "video task {} ended as {:?}: {}",
                task_id, status, reason
            )));
        }
        Ok((status, None))
    }

    /// Submit and wait; returns the URL of the generated video.
    pub async fn generate(&self, prompt: &str, size: VideoSize) -> Result<String> {
        let task_id = self.submit(prompt, size).await?;
        let started = Instant::now();
        loop {
            if let (_, Some(url)) = self.status(&task_id).await? {
                info!(task_id = %task_id, elapsed = ?started.elapsed(), "video ready");
                return Ok(url);
            }
            if started.elapsed() >= self.max_wait {
                return Err(Error::generation(format!(
                    "video task {} not finished after {:?}",
                    task_id, self.max_wait
                )));
            }
            debug!(task_id = %task_id, "video still rendering");
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Generate and download. Without an explicit destination the file is
    /// named `generated_video_{timestamp}.mp4` in the working directory.
    pub async fn generate_to_file(
        &self,
        prompt: &str,
        size: VideoSize,
        downloader: &Downloader,
        destination: Option<&Path>,
        progress: &dyn ProgressSink,
    ) -> Result<PathBuf> {
        let url = self.generate(prompt, size).await?;
        let destination = match destination {
            Some(path) => path.to_path_buf(),
            None => timestamped_path("", "generated_video_", "mp4"),
        };
        downloader
            .download_with_progress(&url, &destination, progress)
            .await
    }
}

fn parse_success(resp: &RawResponse) -> Result<serde_json::Value> {
    if !resp.is_success() {
        return Err(Error::generation_status(resp.status, resp.error_message()));
    }
    resp.json()
        .map_err(|e| Error::generation(format!("malformed video reply: {}", e)))
}

pub struct VideoClientBuilder {
    model: Option<String>,
    api_key: Option<String>,
    base_url: Option<String>,
    poll_interval: Duration,
    max_wait: Duration,
}

impl VideoClientBuilder {
    pub fn new() -> Self {
        Self {
            model: None,
            api_key: None,
            base_url: None,
            poll_interval: Duration::from_secs(5),
            max_wait: Duration::from_secs(15 * 60),
        }
    }
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
    pub fn max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = max_wait;
        self
    }

    pub fn build(self) -> Result<VideoClient> {
        let model = self.model.unwrap_or_else(|| "wan2.2-t2v-plus".to_string());
        let api_key = match self.api_key {
            Some(key) => key,
            None => config::require_var(&["DASHSCOPE_API_KEY"])?,
        };
        let base_url = self
            .base_url
            .unwrap_or_else(|| config::DASHSCOPE_BASE_URL.to_string());
        let cfg = ProviderConfig::new(api_key, base_url);
        Ok(VideoClient {
            transport: HttpTransport::new(&cfg)?,
            model,
            poll_interval: self.poll_interval,
            max_wait: self.max_wait,
        })
    }
}

impl Default for VideoClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
