//! Shared configuration for prtgly.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `prtgly_core::ServerConfig`. The CLI layers its
//! flag overrides on top of what this crate produces.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use prtgly_core::{Credentials, ServerConfig, TlsVerification};

const KEYRING_SERVICE: &str = "prtgly";
const REDACTED: &str = "********";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found in config")]
    UnknownProfile { name: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named on the command line.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named server profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Look up `name`, or the default profile when `name` is `None`.
    pub fn profile<'a>(
        &'a self,
        name: Option<&'a str>,
    ) -> Result<(&'a str, &'a Profile), ConfigError> {
        let name = name
            .or(self.default_profile.as_deref())
            .unwrap_or("default");
        self.profiles
            .get(name)
            .map(|profile| (name, profile))
            .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() })
    }

    /// Copy with every plaintext secret masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        for profile in copy.profiles.values_mut() {
            for secret in [
                &mut profile.passhash,
                &mut profile.password,
                &mut profile.api_token,
            ] {
                if secret.is_some() {
                    *secret = Some(REDACTED.into());
                }
            }
        }
        copy
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default = "default_lift_concurrency")]
    pub lift_concurrency: usize,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
            page_size: default_page_size(),
            lift_concurrency: default_lift_concurrency(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_page_size() -> u32 {
    prtgly_core::DEFAULT_PAGE_SIZE
}
fn default_lift_concurrency() -> usize {
    prtgly_core::DEFAULT_LIFT_CONCURRENCY
}

/// How a profile authenticates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// Username + passhash.
    #[default]
    Passhash,
    /// Username + account password.
    Password,
    /// API token.
    Token,
}

/// A named PRTG server profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Server base URL (e.g., "https://prtg.example.com").
    pub server: String,

    #[serde(default)]
    pub auth: AuthMode,

    pub username: Option<String>,

    /// Passhash (plaintext, prefer keyring or env var).
    pub passhash: Option<String>,
    /// Environment variable holding the passhash.
    pub passhash_env: Option<String>,

    /// Password (plaintext, prefer keyring or env var).
    pub password: Option<String>,
    pub password_env: Option<String>,

    /// API token (plaintext, prefer keyring or env var).
    pub api_token: Option<String>,
    pub api_token_env: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    pub insecure: Option<bool>,
    pub timeout: Option<u64>,
    pub page_size: Option<u32>,
    pub lift_concurrency: Option<usize>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "prtgly", "prtgly").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("prtgly");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path` + environment. A missing file yields the defaults.
///
/// Environment overrides use `PRTGLY_` and `__` as the nesting separator,
/// e.g. `PRTGLY_PROFILES__LAB__SERVER`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("PRTGLY_").split("__"));

    Ok(figment.extract()?)
}

// ── Credential resolution ───────────────────────────────────────────

/// Where secrets live outside the config file.
pub trait SecretStore {
    fn env(&self, name: &str) -> Option<String>;

    /// Look up `key` (e.g. `lab/passhash`) in the secret store.
    fn keyring(&self, key: &str) -> Option<String>;
}

/// Process environment and the OS keyring.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSecrets;

impl SecretStore for SystemSecrets {
    fn env(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn keyring(&self, key: &str) -> Option<String> {
        keyring::Entry::new(KEYRING_SERVICE, key)
            .and_then(|entry| entry.get_password())
            .ok()
    }
}

/// Resolve one secret: env var, then keyring, then plaintext.
fn resolve_secret(
    store: &impl SecretStore,
    env_name: Option<&str>,
    keyring_key: &str,
    plaintext: Option<&str>,
) -> Option<SecretString> {
    env_name
        .and_then(|name| store.env(name))
        .or_else(|| store.keyring(keyring_key))
        .or_else(|| plaintext.map(str::to_owned))
        .map(SecretString::from)
}

/// Resolve `Credentials` for a profile from its `auth` mode.
pub fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
    store: &impl SecretStore,
) -> Result<Credentials, ConfigError> {
    let missing = || ConfigError::NoCredentials {
        profile: profile_name.into(),
    };

    if profile.auth == AuthMode::Token {
        let token = resolve_secret(
            store,
            profile.api_token_env.as_deref(),
            &format!("{profile_name}/api-token"),
            profile.api_token.as_deref(),
        )
        .ok_or_else(missing)?;
        return Ok(Credentials::ApiToken { token });
    }

    let username = profile
        .username
        .clone()
        .or_else(|| store.env("PRTGLY_USERNAME"))
        .ok_or_else(missing)?;

    match profile.auth {
        AuthMode::Passhash => {
            let passhash = resolve_secret(
                store,
                profile.passhash_env.as_deref(),
                &format!("{profile_name}/passhash"),
                profile.passhash.as_deref(),
            )
            .ok_or_else(missing)?;
            Ok(Credentials::PassHash { username, passhash })
        }
        AuthMode::Password | AuthMode::Token => {
            let password = resolve_secret(
                store,
                profile.password_env.as_deref(),
                &format!("{profile_name}/password"),
                profile.password.as_deref(),
            )
            .ok_or_else(missing)?;
            Ok(Credentials::Password { username, password })
        }
    }
}

/// Build a `ServerConfig` from a profile, with `defaults` filling gaps.
pub fn profile_to_server_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
    store: &impl SecretStore,
) -> Result<ServerConfig, ConfigError> {
    let credentials = resolve_credentials(profile, profile_name, store)?;
    server_config_with(profile, defaults, credentials)
}

/// Like [`profile_to_server_config`], with credentials already in hand.
pub fn server_config_with(
    profile: &Profile,
    defaults: &Defaults,
    credentials: Credentials,
) -> Result<ServerConfig, ConfigError> {
    let url: url::Url = profile.server.parse().map_err(|_| ConfigError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {}", profile.server),
    })?;

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let mut config = ServerConfig::new(url, credentials);
    config.tls = tls;
    config.timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));
    config.page_size = profile.page_size.unwrap_or(defaults.page_size).max(1);
    config.lift_concurrency = profile
        .lift_concurrency
        .unwrap_or(defaults.lift_concurrency)
        .max(1);
    Ok(config)
}
