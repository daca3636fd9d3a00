use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use switchyard_core::{JsonOutputParser, LlmRequest, SwitchyardError, Value};
use switchyard_llm::Llm;
use switchyard_prompt::{ChatPromptTemplate, MessagePromptTemplate};

use crate::field_text;
use crate::pipeline::KycAgent;

pub const DOCUMENT_TEXT_KEY: &str = "document_text";
pub const STRUCTURED_DATA_KEY: &str = "structured_data";

const SYSTEM_PROMPT: &str =
    "You are an intelligent KYC document parser that returns structured JSON output.";

const EXTRACTION_PROMPT: &str = "Extract the following fields from the document:
- Customer Name
- Date of Birth
- Address
Return the output strictly in valid JSON format.

Document:
{{document_text}}";

/// Typed view of the ingestor's JSON output.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct CustomerRecord {
    #[serde(rename = "Customer Name", alias = "customer_name", alias = "name")]
    pub customer_name: Option<String>,
    #[serde(rename = "Date of Birth", alias = "date_of_birth", alias = "dob")]
    pub date_of_birth: Option<String>,
    #[serde(rename = "Address", alias = "address")]
    pub address: Option<String>,
}

impl CustomerRecord {
    pub fn parse(text: &str) -> Result<Self, SwitchyardError> {
        JsonOutputParser::<Self>::new().parse(text)
    }
}

/// Extracts customer name, date of birth and address from `document_text`
/// into `structured_data`.
pub struct DocumentIngestor<L> {
    llm: L,
    model: String,
    prompt: ChatPromptTemplate,
}

impl<L: Llm> DocumentIngestor<L> {
    pub fn new(llm: L) -> Self {
        Self {
            llm,
            model: String::new(),
            prompt: ChatPromptTemplate::new(vec![
                MessagePromptTemplate::system(SYSTEM_PROMPT),
                MessagePromptTemplate::human(EXTRACTION_PROMPT),
            ]),
        }
    }

    /// Overrides the client's default model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[async_trait]
impl<L: Llm> KycAgent for DocumentIngestor<L> {
    fn name(&self) -> &str {
        "document_ingestor"
    }

    async fn process(&self, message: Value) -> Result<Value, SwitchyardError> {
        let vars = HashMap::from([(
            DOCUMENT_TEXT_KEY.to_string(),
            Value::String(field_text(&message, DOCUMENT_TEXT_KEY)),
        )]);
        let request = LlmRequest {
            model: self.model.clone(),
            messages: self.prompt.format_messages(&vars)?,
            temperature: Some(0.2),
            max_tokens: Some(300),
        };
        let response = self.llm.invoke(request).await?;
        Ok(json!({ STRUCTURED_DATA_KEY: response.content.trim() }))
    }
}
