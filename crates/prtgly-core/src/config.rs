// ── Runtime connection configuration ──
//
// Describes how to reach one PRTG core server. Built by the CLI from a
// config profile; core never reads config files itself.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use prtgly_api::{Credentials, TlsMode, TransportConfig};

use crate::lift::DEFAULT_LIFT_CONCURRENCY;
use crate::parameters::DEFAULT_PAGE_SIZE;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed certificates on the core server).
    DangerAcceptInvalid,
}

/// Configuration for talking to a single server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server URL (e.g., `https://prtg.example.com`).
    pub url: Url,
    pub credentials: Credentials,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Rows requested per page.
    pub page_size: u32,
    /// Type partitions resolved at once.
    pub lift_concurrency: usize,
}

impl ServerConfig {
    pub fn new(url: Url, credentials: Credentials) -> Self {
        Self {
            url,
            credentials,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            page_size: DEFAULT_PAGE_SIZE,
            lift_concurrency: DEFAULT_LIFT_CONCURRENCY,
        }
    }

    /// HTTP transport settings derived from this config.
    pub fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}
