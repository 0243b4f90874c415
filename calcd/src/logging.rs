//! Tracing setup shared by the serve and stdio commands.

use crate::config::{LogFormat, ServerConfig};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise the configured level applies to the
/// calcd and mcp_core targets. The stdio transport logs to stderr so that
/// stdout stays clean for JSON-RPC.
pub fn init(config: &ServerConfig, to_stderr: bool) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("")
            .add_directive(format!("calcd={}", config.log_level).parse()?)
            .add_directive(format!("mcp_core={}", config.log_level).parse()?),
    };

    let fmt_layer = match (config.log_format, to_stderr) {
        (LogFormat::Text, false) => fmt::layer().boxed(),
        (LogFormat::Text, true) => fmt::layer().with_writer(std::io::stderr).boxed(),
        (LogFormat::Json, false) => fmt::layer().json().boxed(),
        (LogFormat::Json, true) => fmt::layer().json().with_writer(std::io::stderr).boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
