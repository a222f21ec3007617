use secrecy::{ExposeSecret, SecretString};

/// Credentials attached to every table request.
///
/// PRTG authenticates each API call through query parameters rather than
/// a session; obtaining a passhash is left to the caller.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Username plus the account passhash (`username=` / `passhash=`).
    PassHash { username: String, passhash: SecretString },

    /// Username plus the plain account password (`username=` / `password=`).
    Password { username: String, password: SecretString },

    /// API token generated under Setup > Account Settings (`apitoken=`).
    ApiToken { token: SecretString },
}

impl Credentials {
    /// The query parameters that authenticate a request.
    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::PassHash { username, passhash } => vec![
                ("username", username.clone()),
                ("passhash", passhash.expose_secret().to_owned()),
            ],
            Self::Password { username, password } => vec![
                ("username", username.clone()),
                ("password", password.expose_secret().to_owned()),
            ],
            Self::ApiToken { token } => vec![("apitoken", token.expose_secret().to_owned())],
        }
    }

    /// Account name for log context, if the credential carries one.
    pub fn username(&self) -> Option<&str> {
        match self {
            Self::PassHash { username, .. } | Self::Password { username, .. } => Some(username),
            Self::ApiToken { .. } => None,
        }
    }
}
