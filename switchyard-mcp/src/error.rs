use thiserror::Error;

use crate::protocol::{INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR};

#[derive(Debug, Error)]
pub enum McpError {
    #[error("parse error: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("method not found: {0}")]
    MethodNotFound(String),
    #[error("Unknown tool requested: {0}")]
    UnknownTool(String),
    #[error("invalid params: {0}")]
    InvalidParams(String),
    #[error("internal error: {0}")]
    Internal(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl McpError {
    /// JSON-RPC error code reported to the client.
    pub fn code(&self) -> i64 {
        match self {
            McpError::Parse(_) => PARSE_ERROR,
            McpError::InvalidRequest(_) => INVALID_REQUEST,
            McpError::MethodNotFound(_) => METHOD_NOT_FOUND,
            McpError::UnknownTool(_) | McpError::InvalidParams(_) => INVALID_PARAMS,
            McpError::Internal(_) | McpError::Io(_) => INTERNAL_ERROR,
        }
    }
}
