//! In-memory session state for the AliceBlue bearer token.

use chrono::{DateTime, Utc};

/// Mutable session record: empty until the first successful authentication,
/// then holding the current bearer token.
///
/// The token is only ever replaced wholesale; there is no partial update.
#[derive(Debug, Default)]
pub struct Session {
    token: Option<String>,
    issued_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached token with a freshly issued one.
    pub fn establish(&mut self, token: String) {
        self.token = Some(token);
        self.issued_at = Some(Utc::now());
    }

    /// Drop the cached token. Idempotent; calling on an empty session is a
    /// no-op.
    pub fn invalidate(&mut self) {
        self.token = None;
        self.issued_at = None;
    }

    /// Pure read of the cached token; never triggers I/O.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.issued_at
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}
