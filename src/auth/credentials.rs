//! API credentials and the checksum handshake.
//!
//! AliceBlue issues a session token in exchange for a SHA-256 checksum of
//! the credential triple. The server recomputes the same hash on its side,
//! so the concatenation order and the absence of separators are part of the
//! wire contract.

use std::fmt;

use sha2::{Digest, Sha256};

/// Immutable credential triple supplied at client construction.
///
/// Owned by the client for its lifetime; never mutated.
#[derive(Clone)]
pub struct Credentials {
    pub user_id: String,
    pub auth_code: String,
    api_secret: String,
}

impl Credentials {
    pub fn new(user_id: String, auth_code: String, api_secret: String) -> Self {
        Self {
            user_id,
            auth_code,
            api_secret,
        }
    }

    /// Compute the session-issuance checksum.
    ///
    /// `hex(sha256(user_id || auth_code || api_secret))`, fields concatenated
    /// in that order with no separator. Pure: same inputs, same digest.
    pub fn checksum(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.user_id.as_bytes());
        hasher.update(self.auth_code.as_bytes());
        hasher.update(self.api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }
}

// Manual Debug so the secret never reaches logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("auth_code", &self.auth_code)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}
