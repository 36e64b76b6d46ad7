use thiserror::Error;

/// Failure taxonomy for AliceBlue API calls.
///
/// Only `Network` faults and 401-expiry are resolved locally by the request
/// executor (bounded retries); every other kind propagates to the caller as
/// a structured value.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport unreachable (DNS, connect, TLS). Retried once with backoff.
    #[error("network error: {0}")]
    Network(String),

    /// The in-flight HTTP call exceeded the client deadline.
    #[error("request timed out")]
    Timeout,

    /// The session endpoint answered with a non-success HTTP status, or the
    /// retry budget was exhausted on a 401.
    #[error("authentication failed with status {status}: {body}")]
    AuthFailed { status: u16, body: String },

    /// The session endpoint answered 200 but rejected the checksum by its
    /// own `stat` field.
    #[error("authentication rejected: {reason}")]
    AuthRejected { reason: String },

    /// A 2xx response carried a body that is not valid JSON. Never retried.
    #[error("malformed response body: {body}")]
    Protocol { body: String },

    /// Application-level non-2xx failure. Never retried.
    #[error("request failed with status {status}: {body}")]
    Request { status: u16, body: String },
}

/// Maximum length of a response body embedded in an error.
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Truncate a response body so errors stay loggable.
pub fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LENGTH {
        body.to_string()
    } else {
        let mut cut = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!(
            "{}... (truncated, {} total bytes)",
            &body[..cut],
            body.len()
        )
    }
}
