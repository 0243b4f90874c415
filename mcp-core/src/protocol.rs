use crate::error::{Error, Result};
use crate::types::*;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Handler trait for MCP tools
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Get tool information
    fn tool_info(&self) -> ToolInfo;

    /// Handle a tool call with the raw `arguments` value
    async fn handle(&self, params: Option<Value>) -> Result<Value>;
}

/// MCP Protocol implementation.
///
/// The tool table is populated once through [`ProtocolBuilder`] and never
/// mutated afterwards, so concurrent reads need no synchronization.
pub struct Protocol {
    server_info: ServerInfo,
    protocol_version: String,
    tools: HashMap<String, Arc<dyn ToolHandler>>,
    tool_order: Vec<String>,
}

impl Protocol {
    pub fn builder(name: impl Into<String>, version: impl Into<String>) -> ProtocolBuilder {
        ProtocolBuilder::new(name, version)
    }

    pub fn server_info(&self) -> &ServerInfo {
        &self.server_info
    }

    /// Handle an incoming message and return the response, if any
    pub async fn handle_message(&self, message: JsonRpcMessage) -> Option<JsonRpcMessage> {
        match message {
            JsonRpcMessage::Request(req) => {
                Some(JsonRpcMessage::Response(self.handle_request(req).await))
            }
            JsonRpcMessage::Notification(notif) => {
                self.handle_notification(notif).await;
                None
            }
            JsonRpcMessage::Batch(batch) => {
                let mut responses = Vec::new();
                for msg in batch {
                    if let Some(resp) = Box::pin(self.handle_message(msg)).await {
                        responses.push(resp);
                    }
                }
                if responses.is_empty() {
                    None
                } else {
                    Some(JsonRpcMessage::Batch(responses))
                }
            }
            JsonRpcMessage::Response(_) => None, // Server doesn't handle responses
        }
    }

    async fn handle_request(&self, req: JsonRpcRequest) -> JsonRpcResponse {
        let result = match McpMethod::parse(&req.method) {
            McpMethod::Initialize => self.handle_initialize(req.params).await,
            McpMethod::Ping => Ok(json!({})),
            McpMethod::Shutdown => Ok(json!({})),
            McpMethod::ToolsList => self.handle_tools_list(req.params).await,
            McpMethod::ToolsCall => self.handle_tools_call(req.params).await,
            McpMethod::Unknown(method) => {
                Err(Error::MethodNotFound(format!("Method not found: {method}")))
            }
        };

        match result {
            Ok(result) => JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                result: Some(result),
                error: None,
                id: req.id,
            },
            Err(error) => JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                result: None,
                error: Some(error_to_json_rpc(error)),
                id: req.id,
            },
        }
    }

    async fn handle_notification(&self, notif: JsonRpcNotification) {
        // Notifications don't require a response
        debug!(method = %notif.method, "Ignoring notification");
    }

    async fn handle_initialize(&self, _params: Option<Value>) -> Result<Value> {
        Ok(json!({
            "protocolVersion": self.protocol_version,
            "capabilities": {
                "tools": {
                    "listChanged": false
                }
            },
            "serverInfo": {
                "name": self.server_info.name,
                "version": self.server_info.version
            }
        }))
    }

    async fn handle_tools_list(&self, _params: Option<Value>) -> Result<Value> {
        let tools_list: Vec<ToolInfo> = self
            .tool_order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|handler| handler.tool_info())
            .collect();
        Ok(json!({
            "tools": tools_list
        }))
    }

    async fn handle_tools_call(&self, params: Option<Value>) -> Result<Value> {
        let params =
            params.ok_or_else(|| Error::InvalidParams("Missing parameters".to_string()))?;

        let tool_name = params
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::InvalidParams("Missing tool name".to_string()))?;

        let tool_params = params.get("arguments");

        let handler = self
            .tools
            .get(tool_name)
            .ok_or_else(|| Error::MethodNotFound(format!("Tool not found: {tool_name}")))?;

        match handler.handle(tool_params.cloned()).await {
            Ok(result) => {
                // Wrap the result in MCP tool response format
                Ok(json!({
                    "content": [{
                        "type": "text",
                        "text": serde_json::to_string_pretty(&result)
                            .unwrap_or_else(|_| result.to_string())
                    }],
                    "isError": false
                }))
            }
            Err(e) => {
                // Tool-level failures ride in a successful envelope
                Ok(json!({
                    "content": [{
                        "type": "text",
                        "text": e.to_string()
                    }],
                    "isError": true
                }))
            }
        }
    }
}

fn error_to_json_rpc(error: Error) -> JsonRpcError {
    match error {
        Error::MethodNotFound(msg) => JsonRpcError {
            code: error_codes::METHOD_NOT_FOUND,
            message: msg,
            data: None,
        },
        Error::InvalidParams(msg) => JsonRpcError {
            code: error_codes::INVALID_PARAMS,
            message: msg,
            data: None,
        },
        Error::Internal(msg) => JsonRpcError {
            code: error_codes::INTERNAL_ERROR,
            message: msg,
            data: None,
        },
        _ => JsonRpcError {
            code: error_codes::SERVER_ERROR,
            message: error.to_string(),
            data: None,
        },
    }
}

/// Builder collecting tools before the protocol is frozen
pub struct ProtocolBuilder {
    name: String,
    version: String,
    protocol_version: String,
    tools: Vec<Arc<dyn ToolHandler>>,
}

impl ProtocolBuilder {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            protocol_version: "2025-03-26".to_string(),
            tools: Vec::new(),
        }
    }

    /// Override the protocol version reported by `initialize`
    pub fn protocol_version(mut self, version: impl Into<String>) -> Self {
        self.protocol_version = version.into();
        self
    }

    /// Add a tool handler. Tools are listed in registration order.
    pub fn tool(mut self, tool: Arc<dyn ToolHandler>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn build(self) -> Protocol {
        let mut tools = HashMap::new();
        let mut tool_order = Vec::new();
        for tool in self.tools {
            let info = tool.tool_info();
            if tools.insert(info.name.clone(), tool).is_none() {
                tool_order.push(info.name);
            }
        }

        Protocol {
            server_info: ServerInfo {
                name: self.name,
                version: self.version,
            },
            protocol_version: self.protocol_version,
            tools,
            tool_order,
        }
    }
}
