//! Command-line interface for calcd

pub mod commands;

use clap::{Parser, Subcommand};
use commands::{ServeCommand, StdioCommand};

#[derive(Parser)]
#[command(name = "calcd")]
#[command(about = "MCP calculator service: arithmetic tools over JSON-RPC", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve MCP over HTTP (plus health, metrics, and the chat relay)
    Serve(ServeCommand),

    /// Serve MCP over stdio for clients that spawn the server directly
    Stdio(StdioCommand),
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(cmd) => cmd.execute().await,
        Commands::Stdio(cmd) => cmd.execute().await,
    }
}
