//! Provider-specific LLM clients

#[cfg(feature = "groq")]
pub mod groq;
