//! MCP adapters for the calculator core

pub mod tools;

pub use tools::{build_protocol, OperationTool};
