pub mod api;
pub mod calc;
pub mod cli;
pub mod config;
pub mod logging;
pub mod mcp;
