use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use switchyard_core::{LlmRequest, LlmResponse, Role, Runnable, SwitchyardError, Value};
use switchyard_kyc::{
    CustomerRecord, DocumentIngestor, KycAgent, KycPipeline, RiskAnalyzer, RiskAssessment,
    RiskLevel,
};

#[derive(Clone, Default)]
struct ScriptedLlm {
    reply: String,
    seen: Arc<Mutex<Vec<LlmRequest>>>,
}

impl ScriptedLlm {
    fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            seen: Arc::default(),
        }
    }

    fn last_request(&self) -> LlmRequest {
        self.seen.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl Runnable<LlmRequest, LlmResponse> for ScriptedLlm {
    async fn invoke(&self, input: LlmRequest) -> Result<LlmResponse, SwitchyardError> {
        self.seen.lock().unwrap().push(input);
        Ok(LlmResponse {
            content: self.reply.clone(),
        })
    }
}

struct FailingLlm;

#[async_trait]
impl Runnable<LlmRequest, LlmResponse> for FailingLlm {
    async fn invoke(&self, _input: LlmRequest) -> Result<LlmResponse, SwitchyardError> {
        Err(SwitchyardError::LlmProvider("401 Unauthorized: invalid key".to_string()))
    }
}

struct Tagger(&'static str);

#[async_trait]
impl KycAgent for Tagger {
    fn name(&self) -> &str {
        self.0
    }

    async fn process(&self, message: Value) -> Result<Value, SwitchyardError> {
        let mut trail = message["trail"].as_array().cloned().unwrap_or_default();
        trail.push(json!(self.0));
        Ok(json!({ "trail": trail }))
    }
}

#[tokio::test]
async fn ingestor_sends_document_with_low_temperature() {
    let llm = ScriptedLlm::replying(
        "  {\"Customer Name\": \"Jane Doe\", \"Date of Birth\": \"1990-04-02\", \"Address\": \"1 Main St\"}\n",
    );
    let ingestor = DocumentIngestor::new(llm.clone());

    let out = ingestor
        .process(json!({ "document_text": "Name: Jane Doe\nDOB: 1990-04-02" }))
        .await
        .unwrap();

    let structured = out["structured_data"].as_str().unwrap();
    assert!(structured.starts_with('{'));
    let record = CustomerRecord::parse(structured).unwrap();
    assert_eq!(record.customer_name.as_deref(), Some("Jane Doe"));
    assert_eq!(record.address.as_deref(), Some("1 Main St"));

    let request = llm.last_request();
    assert_eq!(request.temperature, Some(0.2));
    assert_eq!(request.max_tokens, Some(300));
    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].role, Role::System);
    assert!(request.messages[0].content.contains("KYC document parser"));
    assert!(request.messages[1].content.contains("Name: Jane Doe\nDOB: 1990-04-02"));
    assert!(request.messages[1].content.contains("Date of Birth"));
}

#[tokio::test]
async fn ingestor_treats_missing_document_as_empty() {
    let llm = ScriptedLlm::replying("{}");
    let ingestor = DocumentIngestor::new(llm.clone()).with_model("llama-3.1-8b-instant");

    ingestor.process(json!({})).await.unwrap();

    let request = llm.last_request();
    assert_eq!(request.model, "llama-3.1-8b-instant");
    assert!(request.messages[1].content.ends_with("Document:\n"));
}

#[tokio::test]
async fn analyzer_reads_structured_data() {
    let llm = ScriptedLlm::replying("{\"Risk Level\": \"Medium\", \"Reason\": \"PO box address\"}");
    let analyzer = RiskAnalyzer::new(llm.clone());

    let out = analyzer
        .process(json!({ "structured_data": "{\"Address\": \"PO Box 7\"}" }))
        .await
        .unwrap();

    let assessment = RiskAssessment::parse(out["risk_assessment"].as_str().unwrap()).unwrap();
    assert_eq!(assessment.risk_level, RiskLevel::Medium);

    let request = llm.last_request();
    assert_eq!(request.temperature, Some(0.3));
    assert_eq!(request.max_tokens, Some(200));
    assert!(request.messages[0].content.contains("compliance risk analyzer"));
    assert!(request.messages[1].content.contains("PO Box 7"));
    assert!(request.messages[1].content.contains("\"Risk Level\": \"Medium\""));
    let prompt = &request.messages[1].content;
    assert!(prompt.starts_with("You are a compliance officer assessing customer KYC risk."));
    assert!(prompt.contains("- Low\n- Medium\n- High"));
    assert!(prompt.contains("Provide a short, clear explanation for your decision."));
    assert!(prompt.ends_with("Customer Data:\n{\"Address\": \"PO Box 7\"}"));
}

#[tokio::test]
async fn pipeline_runs_agents_in_registration_order() {
    let mut pipeline = KycPipeline::new();
    pipeline
        .register_agent(Tagger("first"))
        .register_agent(Tagger("second"));
    assert_eq!(pipeline.agent_names(), vec!["first", "second"]);

    let out = pipeline.run_interaction(json!({})).await.unwrap();
    assert_eq!(out, json!({ "trail": ["first", "second"] }));
}

#[tokio::test]
async fn empty_pipeline_returns_input() {
    let pipeline = KycPipeline::new();
    let input = json!({ "document_text": "unchanged" });
    assert_eq!(pipeline.run_interaction(input.clone()).await.unwrap(), input);
}

#[tokio::test]
async fn pipeline_chains_ingestor_into_analyzer() {
    let ingest_llm = ScriptedLlm::replying("{\"Customer Name\": \"Ravi Kumar\"}");
    let risk_llm = ScriptedLlm::replying("{\"Risk Level\": \"Low\", \"Reason\": \"complete record\"}");

    let mut pipeline = KycPipeline::new();
    pipeline
        .register_agent(DocumentIngestor::new(ingest_llm))
        .register_agent(RiskAnalyzer::new(risk_llm.clone()));

    let out = pipeline
        .run_interaction(json!({ "document_text": "Ravi Kumar, Bengaluru" }))
        .await
        .unwrap();

    assert_eq!(
        out,
        json!({ "risk_assessment": "{\"Risk Level\": \"Low\", \"Reason\": \"complete record\"}" })
    );
    assert!(risk_llm.last_request().messages[1]
        .content
        .contains("{\"Customer Name\": \"Ravi Kumar\"}"));
}

#[tokio::test]
async fn pipeline_stops_on_provider_error() {
    let downstream = ScriptedLlm::replying("{}");
    let mut pipeline = KycPipeline::new();
    pipeline
        .register_agent(DocumentIngestor::new(FailingLlm))
        .register_agent(RiskAnalyzer::new(downstream.clone()));

    let err = pipeline
        .run_interaction(json!({ "document_text": "x" }))
        .await
        .unwrap_err();

    assert!(matches!(err, SwitchyardError::LlmProvider(ref msg) if msg.contains("401")));
    assert!(downstream.seen.lock().unwrap().is_empty());
}
