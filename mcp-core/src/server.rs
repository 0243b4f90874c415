use crate::error::Result;
use crate::protocol::Protocol;
use crate::transport::Transport;
use std::sync::Arc;
use tracing::{debug, info};

/// MCP Server: drives a [`Protocol`] over a [`Transport`]
pub struct Server {
    protocol: Arc<Protocol>,
    transport: Box<dyn Transport>,
}

impl Server {
    pub fn new(protocol: Arc<Protocol>, transport: Box<dyn Transport>) -> Self {
        Self {
            protocol,
            transport,
        }
    }

    /// Run the serve loop until the transport closes
    pub async fn start(&mut self) -> Result<()> {
        info!(server = %self.protocol.server_info().name, "Starting MCP server");

        self.transport.start().await?;

        loop {
            match self.transport.receive().await? {
                Some(message) => {
                    debug!("Received message: {:?}", message);

                    if let Some(response) = self.protocol.handle_message(message).await {
                        debug!("Sending response: {:?}", response);
                        self.transport.send(response).await?;
                    }
                }
                None => {
                    info!("Transport closed, shutting down server");
                    break;
                }
            }
        }

        self.transport.close().await?;

        Ok(())
    }
}
