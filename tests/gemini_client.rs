//! Gemini client HTTP tests
//!
//! Points the client at a local wiremock server and checks what each canned
//! response turns into, both through `try_execute` and the total `execute`.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use metaprompt::FaultKind;
use metaprompt::config::ApiKey;
use metaprompt::executor::PromptExecutor;
use metaprompt::llm::{GeminiClient, GeminiConfig, LlmError};

const MODEL: &str = "gemini-2.5-flash";
const ENDPOINT: &str = "/models/gemini-2.5-flash:generateContent";
const KEY: &str = "test-key";

fn executor_for(api_base: impl Into<String>) -> PromptExecutor<GeminiClient> {
    let config = GeminiConfig {
        model: MODEL.to_string(),
        api_base: api_base.into(),
    };
    PromptExecutor::new(GeminiClient::new(ApiKey::new(KEY), config).unwrap())
}

/// Mount a response on the generateContent endpoint, expecting `times` calls
async fn mount(server: &MockServer, response: ResponseTemplate, times: u64) {
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", KEY))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}

/// A 200 with candidate text is returned verbatim; the request carries the
/// key header and the single-turn body
#[tokio::test]
async fn test_success_returns_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", KEY))
        .and(body_json(json!({
            "contents": [{ "role": "user", "parts": [{ "text": "Explain a meta-prompt." }] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "A prompt about prompts." }] },
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let executor = executor_for(server.uri());
    let text = executor.execute("Explain a meta-prompt.", None).await;
    assert_eq!(text.as_deref(), Some("A prompt about prompts."));
}

/// A 429 is a rate limit carrying the server's retry-after, tried once
#[tokio::test]
async fn test_rate_limited() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(429)
            .insert_header("retry-after", "7")
            .set_body_json(json!({ "error": { "code": 429, "message": "Resource exhausted" } })),
        2,
    )
    .await;

    let executor = executor_for(server.uri());
    let err = executor.try_execute("Hello", None).await.unwrap_err();
    assert!(err.is_rate_limit());
    assert_eq!(err.retry_after(), Some(Duration::from_secs(7)));
    assert_eq!(err.kind(), FaultKind::RemoteCall);

    assert_eq!(executor.execute("Hello", None).await, None);
}

/// A 403 surfaces the JSON error message
#[tokio::test]
async fn test_forbidden_uses_error_message() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "Permission denied on resource.", "status": "PERMISSION_DENIED" }
        })),
        2,
    )
    .await;

    let executor = executor_for(server.uri());
    match executor.try_execute("Hello", None).await {
        Err(LlmError::ApiError { status, message }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "Permission denied on resource.");
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(executor.execute("Hello", None).await, None);
}

/// A 200 whose body is not JSON is an unexpected fault
#[tokio::test]
async fn test_non_json_body() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(200).set_body_string("<html>gateway</html>"), 2).await;

    let executor = executor_for(server.uri());
    let err = executor.try_execute("Hello", None).await.unwrap_err();
    assert!(matches!(err, LlmError::Json(_)));
    assert_eq!(err.kind(), FaultKind::Unexpected);

    assert_eq!(executor.execute("Hello", None).await, None);
}

/// JSON that is not an object is rejected as an invalid response
#[tokio::test]
async fn test_json_array_body() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(200).set_body_json(json!([1, 2, 3])), 2).await;

    let executor = executor_for(server.uri());
    let err = executor.try_execute("Hello", None).await.unwrap_err();
    assert!(matches!(err, LlmError::InvalidResponse(_)));
    assert_eq!(err.kind(), FaultKind::Unexpected);

    assert_eq!(executor.execute("Hello", None).await, None);
}

/// A blocked prompt comes back as None
#[tokio::test]
async fn test_blocked_prompt() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "promptFeedback": { "blockReason": "SAFETY" } })),
        1,
    )
    .await;

    let executor = executor_for(server.uri());
    assert!(matches!(
        executor.try_execute("Hello", None).await,
        Err(LlmError::Blocked(reason)) if reason == "SAFETY"
    ));
}

/// Without the expected key header nothing matches and the server answers 404
#[tokio::test]
async fn test_key_sent_in_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "other-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "unreachable" }] } }]
        })))
        .expect(0)
        .mount(&server)
        .await;

    let executor = executor_for(server.uri());
    assert!(matches!(
        executor.try_execute("Hello", None).await,
        Err(LlmError::ApiError { status: 404, .. })
    ));
    assert_eq!(executor.execute("Hello", None).await, None);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(!requests[0].url.as_str().contains(KEY));
    assert_eq!(requests[0].headers.get("x-goog-api-key").unwrap().to_str().unwrap(), KEY);
}

/// A model override changes the endpoint path
#[tokio::test]
async fn test_model_override_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-pro:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "pro" }] }, "finishReason": "STOP" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let executor = executor_for(server.uri());
    assert_eq!(executor.execute("Hello", Some("gemini-2.5-pro")).await.as_deref(), Some("pro"));
}

/// Nothing listening is a network fault
#[tokio::test]
async fn test_transport_failure() {
    let executor = executor_for("http://127.0.0.1:1");

    let err = executor.try_execute("Hello", None).await.unwrap_err();
    assert!(matches!(err, LlmError::Network(_)));
    assert_eq!(err.kind(), FaultKind::RemoteCall);

    assert_eq!(executor.execute("Hello", None).await, None);
}
