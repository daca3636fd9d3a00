#![cfg(feature = "groq")]

use httpmock::prelude::*;
use serde_json::json;
use switchyard_core::{Runnable, SwitchyardError};
use switchyard_llm::{GroqClient, LlmRequest, Message};

#[test]
fn groq_defaults_to_llama_model() {
    let client = GroqClient::new("gsk-test").unwrap();
    assert_eq!(client.model(), "llama-3.3-70b-versatile");
    let client = client.with_model("mixtral-8x7b-32768");
    assert_eq!(client.model(), "mixtral-8x7b-32768");
}

#[test]
fn groq_rejects_empty_key() {
    let err = GroqClient::new("  ").unwrap_err();
    assert!(matches!(err, SwitchyardError::InvalidConfig(_)));
}

#[tokio::test]
async fn groq_posts_to_openai_path() {
    let server = MockServer::start_async().await;
    let base = server.url("/openai");
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/openai/v1/chat/completions")
                .header("authorization", "Bearer gsk-test")
                .body_contains("llama-3.3-70b-versatile");
            then.status(200).json_body(json!({
                "choices": [{"message": {"role": "assistant", "content": "{\"ok\": true}"}}]
            }));
        })
        .await;

    let client = GroqClient::with_base_url("gsk-test", base).unwrap();
    let resp = client
        .invoke(LlmRequest {
            messages: vec![Message::user("ping")],
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(resp.content, "{\"ok\": true}");
    mock.assert_async().await;
}
