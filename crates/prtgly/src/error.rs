//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use prtgly_config::ConfigError;
use prtgly_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the PRTG server: {reason}")]
    #[diagnostic(
        code(prtgly::connection_failed),
        help(
            "Check that the core server is running and reachable.\n\
             Self-signed certificate? Try: prtgly --insecure ..."
        )
    )]
    ConnectionFailed { reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed")]
    #[diagnostic(
        code(prtgly::auth_failed),
        help(
            "Verify the username and passhash (or API token) for profile '{profile}'.\n\
             The passhash is shown under Setup > Account Settings > My Account."
        )
    )]
    AuthFailed { profile: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(prtgly::no_credentials),
        help(
            "Add passhash or api_token to the profile, store it in the keyring,\n\
             or pass --api-token / --username with --passhash."
        )
    )]
    NoCredentials { profile: String },

    // ── Server ───────────────────────────────────────────────────────
    #[error("Server rejected the request (HTTP {status}): {diagnostic}")]
    #[diagnostic(code(prtgly::request_failed))]
    RequestFailed { status: u16, diagnostic: String },

    #[error("{message}")]
    #[diagnostic(
        code(prtgly::resolution_failed),
        help("Run without --resolve to list the generic objects.")
    )]
    ResolutionFailed { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(prtgly::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(prtgly::profile_not_found),
        help("Available profiles: {available}")
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No server configured")]
    #[diagnostic(
        code(prtgly::no_config),
        help(
            "Create a profile in {path}\n\
             or pass --server with --api-token."
        )
    )]
    NoConfig { path: String },

    #[error("{0}")]
    #[diagnostic(code(prtgly::config))]
    Config(String),

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(prtgly::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(prtgly::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::ProfileNotFound { .. } | Self::NoConfig { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::RequestFailed {
                status: None,
                diagnostic,
            } => Self::ConnectionFailed { reason: diagnostic },

            CoreError::RequestFailed {
                status: Some(401),
                ..
            } => Self::AuthFailed {
                profile: "current".into(),
            },

            CoreError::RequestFailed {
                status: Some(status),
                diagnostic,
            } => Self::RequestFailed { status, diagnostic },

            err @ (CoreError::PartitionResolutionFailed { .. }
            | CoreError::PartialResolution { .. }) => Self::ResolutionFailed {
                message: err.to_string(),
            },

            CoreError::Config { message } => Self::Config(message),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::UnknownProfile { name } => Self::ProfileNotFound {
                name,
                available: String::new(),
            },
            other => Self::Config(other.to_string()),
        }
    }
}
