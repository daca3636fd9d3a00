use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use switchyard_agents::AgentChat;
use switchyard_core::{Tool, ToolError, TryFromValue, Value};

pub const AGENT_CHAT_TOOL: &str = "agent_chat";

/// Arguments accepted by the `agent_chat` tool.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct AgentChatArguments {
    /// User message to send to the agent graph
    pub message: String,
    /// Optional thread identifier to keep the conversation memory scoped
    #[serde(default)]
    pub thread_id: Option<String>,
}

/// Routes a message through the todo / analysis / echo agents.
#[derive(Clone)]
pub struct AgentChatTool {
    chat: Arc<AgentChat>,
}

impl AgentChatTool {
    pub fn new(chat: Arc<AgentChat>) -> Self {
        Self { chat }
    }
}

#[async_trait::async_trait]
impl Tool for AgentChatTool {
    fn name(&self) -> &str {
        AGENT_CHAT_TOOL
    }

    fn description(&self) -> &str {
        "Route a message through a small graph of todo, analysis, and echo agents. \
         Provide an optional thread_id to reuse conversation memory."
    }

    fn schema(&self) -> Value {
        serde_json::to_value(schemars::schema_for!(AgentChatArguments)).unwrap_or(Value::Null)
    }

    async fn invoke(&self, args: Value) -> Result<Value, ToolError> {
        let args = AgentChatArguments::try_from_value(args)
            .map_err(|err| ToolError::InvalidInput(err.to_string()))?;
        let reply = self
            .chat
            .chat(&args.message, args.thread_id.as_deref())
            .await
            .map_err(|err| ToolError::ExecutionFailed(err.to_string()))?;
        Ok(Value::String(reply.text))
    }
}
