//! Authentication module for the AliceBlue session lifecycle.
//!
//! This module provides:
//! - `Credentials`: the immutable credential triple and its SHA-256
//!   checksum handshake
//! - `Session`: in-memory bearer-token state, replaced wholesale on every
//!   re-authentication
//!
//! The network half of authentication lives in `api::client`, which owns
//! the session behind a lock.

pub mod credentials;
pub mod session;

pub use credentials::Credentials;
pub use session::Session;
