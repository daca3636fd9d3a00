//! KYC helpers backed by a hosted chat model: a document ingestor that pulls
//! customer fields out of free text, and a risk analyzer that grades them.
//!
//! Model output is passed through as text. [`CustomerRecord::parse`] and
//! [`RiskAssessment::parse`] give typed views for callers that want them.

mod ingestor;
mod pipeline;
mod risk;

pub use ingestor::{CustomerRecord, DocumentIngestor, DOCUMENT_TEXT_KEY, STRUCTURED_DATA_KEY};
pub use pipeline::{KycAgent, KycPipeline};
pub use risk::{RiskAnalyzer, RiskAssessment, RiskLevel, RISK_ASSESSMENT_KEY};

use switchyard_core::Value;

/// String field of a JSON object; non-string values are rendered as JSON and
/// a missing field is "".
pub(crate) fn field_text(message: &Value, key: &str) -> String {
    match message.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
