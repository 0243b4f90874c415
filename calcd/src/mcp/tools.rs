//! ToolHandler adapters exposing registry operations as MCP tools.
//!
//! All four operations share one adapter shape, so a single generic
//! handler is instantiated per registry entry; adding an operation means
//! adding a registry entry, not another handler type.

use crate::calc::{dispatch, validate, CalcError, Operation, Registry};
use async_trait::async_trait;
use mcp_core::{Error as McpError, Protocol, Result as McpResult, ToolHandler, ToolInfo};
use serde_json::Value;
use std::sync::Arc;

/// An MCP tool backed by one registry operation
pub struct OperationTool {
    op: Operation,
}

impl OperationTool {
    pub fn new(op: Operation) -> Self {
        Self { op }
    }
}

#[async_trait]
impl ToolHandler for OperationTool {
    fn tool_info(&self) -> ToolInfo {
        ToolInfo {
            name: self.op.name.to_string(),
            description: self.op.description.to_string(),
            input_schema: self.op.input_schema(),
        }
    }

    async fn handle(&self, params: Option<Value>) -> McpResult<Value> {
        let args = validate(&self.op, params.as_ref()).map_err(to_mcp_error)?;
        let result = dispatch(&self.op, args).map_err(to_mcp_error)?;
        Ok(Value::from(result))
    }
}

fn to_mcp_error(err: CalcError) -> McpError {
    if err.is_validation() {
        McpError::InvalidParams(err.to_string())
    } else {
        McpError::Tool(err.to_string())
    }
}

/// Build the MCP protocol with every registry operation registered as a
/// tool, in registry order.
pub fn build_protocol(registry: &Registry, protocol_version: &str) -> Protocol {
    let mut builder = Protocol::builder("calcd", env!("CARGO_PKG_VERSION"))
        .protocol_version(protocol_version);
    for op in registry.list() {
        builder = builder.tool(Arc::new(OperationTool::new(*op)));
    }
    builder.build()
}
