use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use switchyard_core::{JsonOutputParser, LlmRequest, SwitchyardError, Value};
use switchyard_llm::Llm;
use switchyard_prompt::{ChatPromptTemplate, MessagePromptTemplate};

use crate::field_text;
use crate::ingestor::STRUCTURED_DATA_KEY;
use crate::pipeline::KycAgent;

pub const RISK_ASSESSMENT_KEY: &str = "risk_assessment";

const SYSTEM_PROMPT: &str = "You are an AI compliance risk analyzer for KYC evaluation.";

const ASSESSMENT_PROMPT: &str = "You are a compliance officer assessing customer KYC risk.
Based on the structured data below, classify the customer's risk level as:
- Low
- Medium
- High

Provide a short, clear explanation for your decision.
Always return your output in JSON format like:
{
    \"Risk Level\": \"Medium\",
    \"Reason\": \"Customer has incomplete address details but no sanctions hits.\"
}

Customer Data:
{{structured_data}}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum RiskLevel {
    #[serde(alias = "low", alias = "LOW")]
    Low,
    #[serde(alias = "medium", alias = "MEDIUM")]
    Medium,
    #[serde(alias = "high", alias = "HIGH")]
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        };
        f.write_str(label)
    }
}

/// Typed view of the analyzer's JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RiskAssessment {
    #[serde(rename = "Risk Level", alias = "risk_level")]
    pub risk_level: RiskLevel,
    #[serde(rename = "Reason", alias = "reason", default)]
    pub reason: String,
}

impl RiskAssessment {
    pub fn parse(text: &str) -> Result<Self, SwitchyardError> {
        JsonOutputParser::<Self>::new().parse(text)
    }
}

/// Grades `structured_data` as Low, Medium or High risk into
/// `risk_assessment`.
pub struct RiskAnalyzer<L> {
    llm: L,
    model: String,
    prompt: ChatPromptTemplate,
}

impl<L: Llm> RiskAnalyzer<L> {
    pub fn new(llm: L) -> Self {
        Self {
            llm,
            model: String::new(),
            prompt: ChatPromptTemplate::new(vec![
                MessagePromptTemplate::system(SYSTEM_PROMPT),
                MessagePromptTemplate::human(ASSESSMENT_PROMPT),
            ]),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[async_trait]
impl<L: Llm> KycAgent for RiskAnalyzer<L> {
    fn name(&self) -> &str {
        "risk_analyzer"
    }

    async fn process(&self, message: Value) -> Result<Value, SwitchyardError> {
        let vars = HashMap::from([(
            STRUCTURED_DATA_KEY.to_string(),
            Value::String(field_text(&message, STRUCTURED_DATA_KEY)),
        )]);
        let request = LlmRequest {
            model: self.model.clone(),
            messages: self.prompt.format_messages(&vars)?,
            temperature: Some(0.3),
            max_tokens: Some(200),
        };
        let response = self.llm.invoke(request).await?;
        Ok(json!({ RISK_ASSESSMENT_KEY: response.content.trim() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fenced_assessment() {
        let text = "```json\n{\"Risk Level\": \"High\", \"Reason\": \"Sanctions hit\"}\n```";
        let assessment = RiskAssessment::parse(text).unwrap();
        assert_eq!(assessment.risk_level, RiskLevel::High);
        assert_eq!(assessment.reason, "Sanctions hit");
    }

    #[test]
    fn accepts_snake_case_keys_and_lowercase_level() {
        let assessment =
            RiskAssessment::parse(r#"{"risk_level": "low", "reason": "clean"}"#).unwrap();
        assert_eq!(assessment.risk_level, RiskLevel::Low);
        assert_eq!(assessment.risk_level.to_string(), "Low");
    }

    #[test]
    fn rejects_unknown_level() {
        let err = RiskAssessment::parse(r#"{"Risk Level": "Severe"}"#).unwrap_err();
        assert!(matches!(err, SwitchyardError::ParseFailed { .. }));
    }
}
