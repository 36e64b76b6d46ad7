//! AliceBlue MCP server binary.
//!
//! Exposes the AliceBlue trading API as MCP tools over stdio. Credentials
//! come from the environment; logging goes to stderr because stdout carries
//! the MCP frames.

use std::io;

use anyhow::Result;
use rmcp::{transport::stdio, ServiceExt};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use aliceblue_mcp::config::Config;
use aliceblue_mcp::server::AliceBlueServer;

/// Initialize the tracing subscriber for logging.
fn init_tracing() {
    // RUST_LOG controls the level (e.g. RUST_LOG=debug).
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let config = Config::from_env()?;
    info!(user_id = %config.user_id, base_url = %config.base_url, "starting AliceBlue MCP server");

    let server = AliceBlueServer::new(&config)?;
    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    info!("AliceBlue MCP server shut down");
    Ok(())
}
