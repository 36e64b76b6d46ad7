//! AliceBlue MCP server library.
//!
//! Exposes the AliceBlue broker API as MCP tools. The engineered core is
//! the session lifecycle (checksum handshake, cached bearer token) and the
//! resilient request executor in [`api`]; the tool surface in [`server`]
//! is a thin typed layer over it.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod server;
