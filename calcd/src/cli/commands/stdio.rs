//! Stdio serve command

use crate::calc::Registry;
use crate::config::ServerConfig;
use crate::logging;
use crate::mcp::build_protocol;
use clap::Args;
use mcp_core::{Server, StdioTransport};
use std::sync::Arc;

#[derive(Args)]
pub struct StdioCommand {
    #[command(flatten)]
    config: ServerConfig,
}

impl StdioCommand {
    pub async fn execute(self) -> anyhow::Result<()> {
        // Logs go to stderr so stdout carries nothing but JSON-RPC
        logging::init(&self.config, true)?;

        let registry = Registry::new();
        let protocol = Arc::new(build_protocol(&registry, &self.config.protocol_version));
        let transport = Box::new(StdioTransport::new());

        let mut server = Server::new(protocol, transport);
        server.start().await?;

        Ok(())
    }
}
