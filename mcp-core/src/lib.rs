//! Model Context Protocol (MCP) server library.
//!
//! Provides the JSON-RPC 2.0 envelope types, the MCP method dispatch
//! (`initialize`, `tools/list`, `tools/call`, `ping`, `shutdown`), the
//! [`ToolHandler`] trait for exposing named tools, and a line-delimited
//! stdio transport with a serving loop.

pub mod error;
pub mod protocol;
pub mod server;
pub mod transport;
pub mod types;

// Re-export commonly used types
pub use error::{Error, Result};
pub use protocol::{Protocol, ProtocolBuilder, ToolHandler};
pub use server::Server;
pub use transport::stdio::StdioTransport;
pub use transport::Transport;
pub use types::*;
