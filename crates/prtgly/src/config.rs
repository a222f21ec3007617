//! CLI configuration: thin wrapper around `prtgly_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--server, --api-token, --insecure, ...).

use std::time::Duration;

use secrecy::SecretString;

use prtgly_config::{Profile, SystemSecrets};
use prtgly_core::{Credentials, ServerConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use prtgly_config::{Config, config_path, load_config};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Credentials given directly on the command line or in the environment.
fn flag_credentials(global: &GlobalOpts) -> Option<Credentials> {
    if let Some(ref token) = global.api_token {
        return Some(Credentials::ApiToken {
            token: SecretString::from(token.clone()),
        });
    }
    match (&global.username, &global.passhash) {
        (Some(username), Some(passhash)) => Some(Credentials::PassHash {
            username: username.clone(),
            passhash: SecretString::from(passhash.clone()),
        }),
        _ => None,
    }
}

/// Build a `ServerConfig` from the config file, profile, and CLI overrides.
pub fn build_server_config(global: &GlobalOpts) -> Result<ServerConfig, CliError> {
    let cfg = load_config()?;
    let profile_name = active_profile_name(global, &cfg);

    let mut config = if let Some(profile) = cfg.profiles.get(&profile_name) {
        let mut profile = profile.clone();
        if let Some(ref server) = global.server {
            profile.server.clone_from(server);
        }
        let credentials = match flag_credentials(global) {
            Some(credentials) => credentials,
            None => prtgly_config::resolve_credentials(&profile, &profile_name, &SystemSecrets)?,
        };
        prtgly_config::server_config_with(&profile, &cfg.defaults, credentials)?
    } else if global.profile.is_some() {
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: available_profiles(&cfg),
        });
    } else {
        // No profile: everything must come from flags / env vars.
        let server = global.server.clone().ok_or_else(|| CliError::NoConfig {
            path: config_path().display().to_string(),
        })?;
        let credentials = flag_credentials(global).ok_or(CliError::NoCredentials {
            profile: profile_name,
        })?;
        let profile = Profile {
            server,
            ..Profile::default()
        };
        prtgly_config::server_config_with(&profile, &cfg.defaults, credentials)?
    };

    apply_overrides(&mut config, global);
    Ok(config)
}

fn apply_overrides(config: &mut ServerConfig, global: &GlobalOpts) {
    if global.insecure {
        config.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        config.timeout = Duration::from_secs(secs);
    }
    if let Some(page_size) = global.page_size {
        config.page_size = page_size;
    }
}

/// Comma-separated profile names, or `(none)`.
pub fn available_profiles(config: &Config) -> String {
    if config.profiles.is_empty() {
        "(none)".into()
    } else {
        config.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}
