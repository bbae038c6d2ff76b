//! Media and completion service clients against a mock server.

use mockito::{Matcher, Server};
use serde_json::json;
use std::time::Duration;
use xingcan_assist::download::{Downloader, NoProgress};
use xingcan_assist::images::ImageClient;
use xingcan_assist::tts::{SpeechClient, TtsOptions, Voice};
use xingcan_assist::video::{VideoClient, VideoSize};
use xingcan_assist::{CompletionClient, Error};

const SPEECH_PATH: &str = "/api/v1/services/aigc/multimodal-generation/generation";
const VIDEO_PATH: &str = "/api/v1/services/aigc/video-generation/video-synthesis";

#[tokio::test]
async fn test_speech_synthesized_and_downloaded() {
    let mut server = Server::new_async().await;
    let audio_url = format!("{}/files/speech.wav", server.url());
    let synth = server
        .mock("POST", SPEECH_PATH)
        .match_header("authorization", "Bearer ds-key")
        .match_body(Matcher::PartialJson(json!({
            "model": "qwen-tts",
            "input": {"text": "你好", "voice": "Ethan"}
        })))
        .with_status(200)
        .with_body(json!({"output": {"audio": {"url": audio_url}}}).to_string())
        .expect(1)
        .create_async()
        .await;
    let file = server
        .mock("GET", "/files/speech.wav")
        .with_status(200)
        .with_body(vec![7u8; 2048])
        .expect(1)
        .create_async()
        .await;

    let client = SpeechClient::builder()
        .api_key("ds-key")
        .base_url(server.url())
        .build()
        .unwrap();
    let options = TtsOptions {
        voice: Voice::Ethan,
        ..Default::default()
    };
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("T2A").join("out.wav");
    let path = client
        .synthesize_to_file(
            "你好",
            &options,
            &Downloader::new().unwrap(),
            Some(dest.as_path()),
            &NoProgress,
        )
        .await
        .unwrap();

    synth.assert_async().await;
    file.assert_async().await;
    assert_eq!(path, dest);
    assert_eq!(std::fs::read(&dest).unwrap(), vec![7u8; 2048]);
}

#[tokio::test]
async fn test_speech_without_url_is_generation_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", SPEECH_PATH)
        .with_status(200)
        .with_body(r#"{"output": {"audio": {"url": ""}}}"#)
        .create_async()
        .await;

    let client = SpeechClient::builder()
        .api_key("k")
        .base_url(server.url())
        .build()
        .unwrap();
    let err = client
        .synthesize("hello", &TtsOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Generation { .. }));
}

#[tokio::test]
async fn test_speech_rejects_bad_input_without_calling_api() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", SPEECH_PATH)
        .expect(0)
        .create_async()
        .await;

    let client = SpeechClient::builder()
        .api_key("k")
        .base_url(server.url())
        .build()
        .unwrap();
    let too_fast = TtsOptions {
        speed: 3.0,
        ..Default::default()
    };
    assert!(matches!(
        client.synthesize("hello", &too_fast).await.unwrap_err(),
        Error::Validation { .. }
    ));
    assert!(matches!(
        client.synthesize("   ", &TtsOptions::default()).await.unwrap_err(),
        Error::Validation { .. }
    ));
    mock.assert_async().await;
}

fn video_client(base_url: String) -> VideoClient {
    VideoClient::builder()
        .api_key("ds-key")
        .base_url(base_url)
        .poll_interval(Duration::from_millis(5))
        .max_wait(Duration::from_millis(200))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_video_task_polled_to_completion() {
    let mut server = Server::new_async().await;
    let video_url = format!("{}/files/clip.mp4", server.url());
    let submit = server
        .mock("POST", VIDEO_PATH)
        .match_header("x-dashscope-async", "enable")
        .match_body(Matcher::PartialJson(json!({
            "model": "wan2.2-t2v-plus",
            "parameters": {"size": "1280*720"}
        })))
        .with_status(200)
        .with_body(r#"{"output": {"task_id": "task-1", "task_status": "PENDING"}}"#)
        .expect(1)
        .create_async()
        .await;
    let _status = server
        .mock("GET", "/api/v1/tasks/task-1")
        .with_status(200)
        .with_body(
            json!({"output": {"task_id": "task-1", "task_status": "SUCCEEDED", "video_url": video_url}})
                .to_string(),
        )
        .create_async()
        .await;
    let _file = server
        .mock("GET", "/files/clip.mp4")
        .with_status(200)
        .with_body(vec![1u8; 1500])
        .create_async()
        .await;

    let client = video_client(server.url());
    let size = VideoSize::parse("1280*720").unwrap();
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("clip.mp4");
    let path = client
        .generate_to_file(
            "a cat running under the moon",
            size,
            &Downloader::new().unwrap(),
            Some(dest.as_path()),
            &NoProgress,
        )
        .await
        .unwrap();

    submit.assert_async().await;
    assert_eq!(std::fs::metadata(path).unwrap().len(), 1500);
}

#[tokio::test]
async fn test_failed_video_task_reports_reason() {
    let mut server = Server::new_async().await;
    let _submit = server
        .mock("POST", VIDEO_PATH)
        .with_status(200)
        .with_body(r#"{"output": {"task_id": "task-2"}}"#)
        .create_async()
        .await;
    let _status = server
        .mock("GET", "/api/v1/tasks/task-2")
        .with_status(200)
        .with_body(r#"{"output": {"task_status": "FAILED", "message": "content moderation"}}"#)
        .create_async()
        .await;

    let err = video_client(server.url())
        .generate("prompt", VideoSize::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Generation { .. }));
    assert!(err.to_string().contains("content moderation"));
}

#[tokio::test]
async fn test_video_wait_is_bounded() {
    let mut server = Server::new_async().await;
    let _submit = server
        .mock("POST", VIDEO_PATH)
        .with_status(200)
        .with_body(r#"{"output": {"task_id": "task-3"}}"#)
        .create_async()
        .await;
    let _status = server
        .mock("GET", "/api/v1/tasks/task-3")
        .with_status(200)
        .with_body(r#"{"output": {"task_status": "RUNNING"}}"#)
        .create_async()
        .await;

    let err = video_client(server.url())
        .generate("prompt", VideoSize::default())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("not finished"));
}

#[tokio::test]
async fn test_image_generated_and_downloaded() {
    let mut server = Server::new_async().await;
    let image_url = format!("{}/files/cat.png", server.url());
    let _gen = server
        .mock("POST", "/images/generations")
        .match_body(Matcher::PartialJson(json!({
            "model": "cogView-4-250304",
            "size": "1024x1024"
        })))
        .with_status(200)
        .with_body(json!({"created": 1, "data": [{"url": image_url}]}).to_string())
        .create_async()
        .await;
    let _file = server
        .mock("GET", "/files/cat.png")
        .with_status(200)
        .with_body(vec![9u8; 600])
        .create_async()
        .await;

    let client = ImageClient::builder()
        .api_key("zp-key")
        .base_url(server.url())
        .build()
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("cat.png");
    client
        .generate_to_file(
            "a cat on a sunny windowsill",
            &Downloader::new().unwrap(),
            &dest,
            &NoProgress,
        )
        .await
        .unwrap();
    assert_eq!(std::fs::read(&dest).unwrap().len(), 600);
}

#[tokio::test]
async fn test_image_api_error_keeps_status() {
    let mut server = Server::new_async().await;
    let _gen = server
        .mock("POST", "/images/generations")
        .with_status(429)
        .with_body(r#"{"error": {"message": "rate limited"}}"#)
        .create_async()
        .await;

    let client = ImageClient::builder()
        .api_key("zp-key")
        .base_url(server.url())
        .build()
        .unwrap();
    let err = client.generate("a cat").await.unwrap_err();
    assert_eq!(err.status(), Some(429));
    assert!(err.to_string().contains("rate limited"));
}

#[tokio::test]
async fn test_describe_image_sends_inline_data_url() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#""model":"glm-4v""#.to_string()),
            Matcher::Regex("data:image/png;base64,".to_string()),
            Matcher::Regex("Describe the content of this image.".to_string()),
        ]))
        .with_status(200)
        .with_body(r#"{"choices": [{"message": {"role": "assistant", "content": "A red square."}}]}"#)
        .expect(1)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("square.png");
    std::fs::write(&image, [0x89, b'P', b'N', b'G']).unwrap();

    let client = CompletionClient::builder()
        .api_key("zp-key")
        .base_url(server.url())
        .build()
        .unwrap();
    let answer = client.describe_image("glm-4v", &image, Some("  ")).await.unwrap();
    assert_eq!(answer, "A red square.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_code_completion_reads_choice_text() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/completions")
        .match_body(Matcher::PartialJson(json!({
            "model": "qwen2.5-coder-32b-instruct",
            "max_tokens": 1024
        })))
        .with_status(200)
        .with_body(r#"{"choices": [{"index": 0, "text": "def quick_sort(arr):\n    ..."}]}"#)
        .create_async()
        .await;

    let client = CompletionClient::builder()
        .api_key("ds-key")
        .base_url(server.url())
        .build()
        .unwrap();
    let code = client
        .complete_text("qwen2.5-coder-32b-instruct", "write quick sort", 1024)
        .await
        .unwrap();
    assert!(code.starts_with("def quick_sort"));
}
