//! REST API client module for the AliceBlue open API.
//!
//! The client owns the session lifecycle: a SHA-256 checksum handshake
//! issues a bearer token, and the request executor transparently refreshes
//! it once when the vendor answers 401. Everything else fails loudly.

pub mod client;
pub mod error;
pub mod request;
pub mod transport;

pub use client::{ApiClient, AuthDetails, DEFAULT_BASE_URL};
pub use error::ApiError;
