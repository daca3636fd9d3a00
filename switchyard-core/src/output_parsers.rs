use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::{LlmResponse, Runnable, SwitchyardError, Value};

/// Removes a surrounding markdown code fence (```json ... ``` or ``` ... ```).
pub fn strip_code_fences(input: &str) -> &str {
    let cleaned = input.trim();
    if let Some(rest) = cleaned.strip_prefix("```json") {
        rest.trim_end_matches("```").trim()
    } else if let Some(rest) = cleaned.strip_prefix("```") {
        rest.trim_end_matches("```").trim()
    } else {
        cleaned
    }
}

/// Parses model text (or `LlmResponse` content) as JSON into `T`.
pub struct JsonOutputParser<T = Value> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonOutputParser<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for JsonOutputParser<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonOutputParser<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T: DeserializeOwned> JsonOutputParser<T> {
    pub fn parse(&self, input: &str) -> Result<T, SwitchyardError> {
        serde_json::from_str(strip_code_fences(input)).map_err(|err| {
            SwitchyardError::ParseFailed {
                output: input.to_string(),
                reason: err.to_string(),
            }
        })
    }
}

#[async_trait]
impl<T: DeserializeOwned + Send + 'static> Runnable<String, T> for JsonOutputParser<T> {
    async fn invoke(&self, input: String) -> Result<T, SwitchyardError> {
        self.parse(&input)
    }
}

#[async_trait]
impl<T: DeserializeOwned + Send + 'static> Runnable<LlmResponse, T> for JsonOutputParser<T> {
    async fn invoke(&self, input: LlmResponse) -> Result<T, SwitchyardError> {
        self.parse(&input.content)
    }
}
