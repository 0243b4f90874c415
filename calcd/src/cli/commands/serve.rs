//! HTTP serve command

use crate::api::{build_router, AppState, ChatHub, Metrics};
use crate::calc::Registry;
use crate::config::ServerConfig;
use crate::logging;
use crate::mcp::build_protocol;
use anyhow::Context;
use clap::Args;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Args)]
pub struct ServeCommand {
    #[command(flatten)]
    config: ServerConfig,
}

impl ServeCommand {
    pub async fn execute(self) -> anyhow::Result<()> {
        logging::init(&self.config, false)?;

        let addr = self
            .config
            .listen_addr()
            .context("invalid listen address")?;

        let registry = Registry::new();
        let protocol = Arc::new(build_protocol(&registry, &self.config.protocol_version));
        let state = AppState {
            protocol,
            metrics: Arc::new(Metrics::default()),
            chat: ChatHub::new(64),
        };

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind on {addr}"))?;
        info!(%addr, "calcd MCP HTTP server ready");

        axum::serve(listener, build_router(state))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("server error")?;

        info!("Shutting down calcd");
        Ok(())
    }
}

async fn shutdown_signal() {
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(_) => std::future::pending().await,
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Received SIGINT (Ctrl+C)");
        }
        _ = sigterm => {
            info!("Received SIGTERM");
        }
    }
}
