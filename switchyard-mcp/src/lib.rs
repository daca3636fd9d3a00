//! Minimal Model Context Protocol server: JSON-RPC 2.0 over newline-delimited
//! stdio, exposing registered [`Tool`](switchyard_core::Tool)s.

mod agent_chat;
mod error;
mod protocol;
mod server;

pub use agent_chat::{AgentChatArguments, AgentChatTool, AGENT_CHAT_TOOL};
pub use error::McpError;
pub use protocol::{
    CallToolParams, CallToolResult, Content, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
    ToolDescriptor, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND,
    PARSE_ERROR, PROTOCOL_VERSION,
};
pub use server::McpServer;
