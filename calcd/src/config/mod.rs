//! Service configuration. Every knob is a CLI flag with an environment
//! variable fallback and a documented default, loaded once at startup.

use clap::{Args, ValueEnum};
use std::net::SocketAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable single-line output
    Text,
    /// Structured JSON output
    Json,
}

#[derive(Debug, Clone, Args)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "CALCD_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "CALCD_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Log verbosity (trace, debug, info, warn, error)
    #[arg(long, env = "CALCD_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format
    #[arg(long, env = "CALCD_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// MCP protocol version reported by the initialize handshake
    #[arg(long, env = "CALCD_PROTOCOL_VERSION", default_value = "2025-03-26")]
    pub protocol_version: String,
}

impl ServerConfig {
    pub fn listen_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}
