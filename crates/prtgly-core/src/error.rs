// ── Core error types ──
//
// Every transport-level failure folds into `RequestFailed`; consumers only
// see the HTTP status (when there was one) and the server's diagnostic.
// Cancellation and unmapped object types are not errors.

use thiserror::Error;

use crate::model::ObjectType;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Query errors ─────────────────────────────────────────────────
    /// A table query failed (transport, server rejection, or an
    /// undecodable response). Never retried.
    #[error("{}", request_failed_message(*status, diagnostic))]
    RequestFailed {
        status: Option<u16>,
        diagnostic: String,
    },

    // ── Resolution errors ────────────────────────────────────────────
    /// The secondary query for one type partition failed.
    #[error("Failed to resolve {} {type_tag} object(s) (ids {}): {source}", ids.len(), join_ids(ids))]
    PartitionResolutionFailed {
        type_tag: ObjectType,
        ids: Vec<u32>,
        #[source]
        source: Box<CoreError>,
    },

    /// Some partitions resolved and some did not.
    #[error("Resolved {resolved} object(s), {} partition(s) failed", failures.len())]
    PartialResolution {
        resolved: usize,
        failures: Vec<CoreError>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// HTTP status of the underlying request failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => *status,
            Self::PartitionResolutionFailed { source, .. } => source.status(),
            _ => None,
        }
    }
}

fn request_failed_message(status: Option<u16>, diagnostic: &str) -> String {
    match status {
        Some(code) => format!("Request failed (HTTP {code}): {diagnostic}"),
        None => format!("Request failed: {diagnostic}"),
    }
}

fn join_ids(ids: &[u32]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<prtgly_api::Error> for CoreError {
    fn from(err: prtgly_api::Error) -> Self {
        match err {
            prtgly_api::Error::RequestFailed { status, diagnostic } => CoreError::RequestFailed {
                status: Some(status),
                diagnostic,
            },
            prtgly_api::Error::Transport(ref e) => CoreError::RequestFailed {
                status: err.status(),
                diagnostic: e.to_string(),
            },
            prtgly_api::Error::Deserialization { message, body: _ } => CoreError::RequestFailed {
                status: None,
                diagnostic: format!("Malformed response: {message}"),
            },
            prtgly_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            prtgly_api::Error::Tls(msg) => CoreError::Config {
                message: format!("TLS error: {msg}"),
            },
            prtgly_api::Error::InvalidCredentials { message } => CoreError::Config {
                message: format!("Invalid credentials: {message}"),
            },
        }
    }
}
