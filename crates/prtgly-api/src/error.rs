use thiserror::Error;

/// Top-level error type for the `prtgly-api` crate.
///
/// Covers every failure mode of a table query: transport, server-side
/// rejection, and response decoding. `prtgly-core` folds all of these
/// into a single request-failure condition.
#[derive(Debug, Error)]
pub enum Error {
    // ── Server ──────────────────────────────────────────────────────
    /// The server answered with a non-success status. `diagnostic` carries
    /// the `error` field of the response body, or the raw body if it had none.
    #[error("Request failed (HTTP {status}): {diagnostic}")]
    RequestFailed { status: u16, diagnostic: String },

    /// Credentials could not be encoded into a request.
    #[error("Invalid credentials: {message}")]
    InvalidCredentials { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// HTTP status associated with this error, if the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
