//! Chat sessions over the OpenAI-compatible client, against a mock server.

use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use xingcan_assist::{ChatOptions, ChatSession, CompletionClient, MessageRole};

const SYSTEM: &str = "You are a helpful AI assistant.";

fn reply(content: &str) -> String {
    json!({
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    })
    .to_string()
}

// Exact bodies keep the mocks mutually exclusive; no temperature avoids float noise.
fn options() -> ChatOptions {
    ChatOptions {
        model: "glm-4-air-250414".to_string(),
        temperature: None,
        max_tokens: None,
    }
}

fn client(server: &ServerGuard) -> CompletionClient {
    CompletionClient::builder()
        .api_key("test-key")
        .base_url(server.url())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_second_send_replays_first_exchange() {
    let mut server = Server::new_async().await;
    let first = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::Json(json!({
            "model": "glm-4-air-250414",
            "messages": [
                {"role": "system", "content": SYSTEM},
                {"role": "user", "content": "What is AI?"}
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(reply("AI is the study of intelligent machines."))
        .expect(1)
        .create_async()
        .await;
    let second = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Json(json!({
            "model": "glm-4-air-250414",
            "messages": [
                {"role": "system", "content": SYSTEM},
                {"role": "user", "content": "What is AI?"},
                {"role": "assistant", "content": "AI is the study of intelligent machines."},
                {"role": "user", "content": "Give an example."}
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(reply("Chess engines."))
        .expect(1)
        .create_async()
        .await;

    let mut session = ChatSession::new(client(&server), options());
    let a = session.send("What is AI?").await.unwrap();
    assert_eq!(a, "AI is the study of intelligent machines.");
    assert_eq!(session.log().len(), 3);

    let b = session.send("Give an example.").await.unwrap();
    assert_eq!(b, "Chess engines.");
    assert_eq!(session.log().len(), 5);
    assert_eq!(session.log().exchanges(), 2);

    first.assert_async().await;
    second.assert_async().await;

    session.reset();
    assert_eq!(session.log().len(), 1);
    assert_eq!(session.log().system().role, MessageRole::System);
}

#[tokio::test]
async fn test_log_grows_by_two_per_exchange() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(reply("ok"))
        .create_async()
        .await;

    let mut session = ChatSession::new(client(&server), options());
    for n in 1..=4 {
        session.send(&format!("question {}", n)).await.unwrap();
        assert_eq!(session.log().len(), 1 + 2 * n);
    }
    session.reset();
    session.reset();
    assert_eq!(session.log().len(), 1);
}

#[tokio::test]
async fn test_remote_error_surfaces_as_completion_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":{"code":"1000","message":"invalid api key"}}"#)
        .create_async()
        .await;

    let mut session = ChatSession::new(client(&server), options());
    let err = session.send("hello").await.unwrap_err();
    assert!(err.is_completion());
    assert_eq!(err.status(), Some(401));
    assert!(err.to_string().contains("invalid api key"));
    assert_eq!(session.log().len(), 1);
}

#[tokio::test]
async fn test_malformed_reply_is_not_recorded() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices": []}"#)
        .create_async()
        .await;

    let mut session = ChatSession::new(client(&server), options());
    let err = session.send("hello").await.unwrap_err();
    assert!(err.is_completion());
    assert_eq!(err.status(), None);
    assert_eq!(session.log().len(), 1);

    let shown = session.send_or_apologize("hello").await;
    assert!(shown.starts_with("Sorry"));
    assert_eq!(session.log().len(), 1);
}
