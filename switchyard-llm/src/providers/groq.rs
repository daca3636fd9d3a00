//! Groq LLM client

use std::time::Duration;

use crate::openai_compatible::OpenAiCompatibleClient;
use crate::{LlmRequest, LlmResponse};
use switchyard_core::{Runnable, SwitchyardError};

pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai";
pub const GROQ_DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Groq LLM client
#[derive(Clone, Debug)]
pub struct GroqClient(OpenAiCompatibleClient);

impl GroqClient {
    /// Create a client against the public Groq endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self, SwitchyardError> {
        Self::with_base_url(api_key, GROQ_BASE_URL)
    }

    /// Create a client against a custom endpoint (proxies, tests).
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl AsRef<str>,
    ) -> Result<Self, SwitchyardError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(SwitchyardError::InvalidConfig(
                "Groq API key is empty".to_string(),
            ));
        }
        let client = OpenAiCompatibleClient::builder()
            .base_url(base_url)?
            .api_key(api_key)
            .default_model(GROQ_DEFAULT_MODEL)
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self(client))
    }

    /// Set the model to use
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.0.set_default_model(model);
        self
    }

    pub fn model(&self) -> &str {
        self.0.default_model()
    }
}

#[async_trait::async_trait]
impl Runnable<LlmRequest, LlmResponse> for GroqClient {
    async fn invoke(&self, input: LlmRequest) -> Result<LlmResponse, SwitchyardError> {
        self.0.invoke(input).await
    }
}
