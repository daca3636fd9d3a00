use httpmock::prelude::*;
use serde_json::json;
use switchyard_kyc::{DocumentIngestor, KycPipeline, RiskAnalyzer, RiskAssessment, RiskLevel};
use switchyard_llm::GroqClient;

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
    })
}

#[tokio::test]
async fn kyc_run_against_mock_groq() {
    let server = MockServer::start_async().await;
    let ingest = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/openai/v1/chat/completions")
                .body_contains("KYC document parser");
            then.status(200)
                .json_body(completion("{\"Customer Name\": \"Ana Silva\"}"));
        })
        .await;
    let risk = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/openai/v1/chat/completions")
                .body_contains("compliance risk analyzer")
                .body_contains("Ana Silva");
            then.status(200).json_body(completion(
                "```json\n{\"Risk Level\": \"High\", \"Reason\": \"No address\"}\n```",
            ));
        })
        .await;

    let base = server.url("/openai");
    let client = GroqClient::with_base_url("gsk-test", &base).unwrap();
    let mut pipeline = KycPipeline::new();
    pipeline
        .register_agent(DocumentIngestor::new(client.clone()))
        .register_agent(RiskAnalyzer::new(client));

    let out = pipeline
        .run_interaction(json!({ "document_text": "Ana Silva, born 1985" }))
        .await
        .unwrap();

    let assessment = RiskAssessment::parse(out["risk_assessment"].as_str().unwrap()).unwrap();
    assert_eq!(assessment.risk_level, RiskLevel::High);
    ingest.assert_async().await;
    risk.assert_async().await;
}

#[tokio::test]
async fn kyc_surfaces_http_errors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/openai/v1/chat/completions");
            then.status(401)
                .json_body(json!({ "error": { "message": "Invalid API Key" } }));
        })
        .await;

    let client = GroqClient::with_base_url("gsk-bad", server.url("/openai")).unwrap();
    let mut pipeline = KycPipeline::new();
    pipeline.register_agent(DocumentIngestor::new(client));

    let err = pipeline
        .run_interaction(json!({ "document_text": "x" }))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Invalid API Key"));
}
