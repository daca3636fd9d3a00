use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::json;
use switchyard_core::{Tool, ToolError, TryFromValue, Value};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use crate::protocol::{
    CallToolParams, CallToolResult, JsonRpcRequest, JsonRpcResponse, ToolDescriptor,
    JSONRPC_VERSION, PROTOCOL_VERSION,
};
use crate::McpError;

pub struct McpServer {
    name: String,
    version: String,
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl McpServer {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            tools: BTreeMap::new(),
        }
    }

    pub fn with_tool<T: Tool + 'static>(mut self, tool: T) -> Self {
        self.register_tool(Arc::new(tool));
        self
    }

    /// Registers a tool; a later registration with the same name replaces it.
    pub fn register_tool(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools
            .values()
            .map(|tool| ToolDescriptor {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                input_schema: tool.schema(),
            })
            .collect()
    }

    /// Serves newline-delimited JSON-RPC on stdin/stdout until stdin closes.
    pub async fn serve_stdio(&self) -> Result<(), McpError> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<(), McpError>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        tracing::info!(server = %self.name, tools = ?self.tool_names(), "MCP server listening");
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }
            if buf.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            if let Some(response) = self.handle_message(&buf).await {
                let mut encoded = serde_json::to_string(&response)
                    .map_err(|err| McpError::Internal(err.to_string()))?;
                encoded.push('\n');
                writer.write_all(encoded.as_bytes()).await?;
                writer.flush().await?;
            }
        }
        tracing::info!("stdin closed, MCP server stopping");
        Ok(())
    }

    /// Handles one raw message. Returns `None` for notifications and for
    /// responses sent by the client.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        self.handle_message(line.as_bytes()).await
    }

    /// Same as [`handle_line`](Self::handle_line) for undecoded bytes; input
    /// that is not UTF-8 gets a parse error reply.
    pub async fn handle_message(&self, raw: &[u8]) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_slice(raw) {
            Ok(value) => value,
            Err(err) => {
                let err = McpError::Parse(err);
                tracing::warn!(error = %err, "rejecting unparsable message");
                return Some(JsonRpcResponse::failure(Value::Null, err.code(), err.to_string()));
            }
        };

        let is_client_response = value.get("method").is_none()
            && (value.get("result").is_some() || value.get("error").is_some());
        if is_client_response {
            return None;
        }

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match JsonRpcRequest::try_from_value(value) {
            Ok(request) if request.jsonrpc == JSONRPC_VERSION => self.handle_request(request).await,
            Ok(request) => {
                let err = McpError::InvalidRequest(format!(
                    "unsupported jsonrpc version '{}'",
                    request.jsonrpc
                ));
                Some(JsonRpcResponse::failure(id, err.code(), err.to_string()))
            }
            Err(err) => {
                let err = McpError::InvalidRequest(err.to_string());
                Some(JsonRpcResponse::failure(id, err.code(), err.to_string()))
            }
        }
    }

    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let JsonRpcRequest {
            id, method, params, ..
        } = request;
        let Some(id) = id else {
            tracing::debug!(%method, "notification received");
            return None;
        };

        match self.dispatch(&method, params).await {
            Ok(result) => Some(JsonRpcResponse::success(id, result)),
            Err(err) => {
                tracing::warn!(%method, error = %err, "request rejected");
                Some(JsonRpcResponse::failure(id, err.code(), err.to_string()))
            }
        }
    }

    async fn dispatch(&self, method: &str, params: Option<Value>) -> Result<Value, McpError> {
        match method {
            "initialize" => Ok(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": { "listChanged": false } },
                "serverInfo": { "name": self.name, "version": self.version },
            })),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": self.descriptors() })),
            "tools/call" => {
                let params = params
                    .ok_or_else(|| McpError::InvalidParams("missing params".to_string()))?;
                let call = CallToolParams::try_from_value(params)
                    .map_err(|err| McpError::InvalidParams(err.to_string()))?;
                let result = self.call_tool(call).await?;
                serde_json::to_value(result).map_err(|err| McpError::Internal(err.to_string()))
            }
            other => Err(McpError::MethodNotFound(other.to_string())),
        }
    }

    async fn call_tool(&self, call: CallToolParams) -> Result<CallToolResult, McpError> {
        let tool = self
            .tools
            .get(&call.name)
            .ok_or_else(|| McpError::UnknownTool(call.name.clone()))?;
        let args = call.arguments.unwrap_or_else(|| json!({}));

        tracing::debug!(tool = %call.name, "calling tool");
        match tool.invoke(args).await {
            Ok(Value::String(text)) => Ok(CallToolResult::text(text)),
            Ok(other) => Ok(CallToolResult::text(other.to_string())),
            Err(ToolError::InvalidInput(reason)) => Err(McpError::InvalidParams(reason)),
            Err(err) => {
                tracing::warn!(tool = %call.name, error = %err, "tool execution failed");
                Ok(CallToolResult::error(err.to_string()))
            }
        }
    }
}
