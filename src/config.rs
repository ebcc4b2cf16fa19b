//! Environment-driven configuration.

use std::time::Duration;

use crate::auth::{Credentials, TokenState};
use crate::{Result, YahooError};

pub const CONSUMER_KEY_ENV_VAR: &str = "YAHOO_CONSUMER_KEY";
pub const CONSUMER_SECRET_ENV_VAR: &str = "YAHOO_CONSUMER_SECRET";
pub const REDIRECT_URI_ENV_VAR: &str = "YAHOO_REDIRECT_URI";
pub const ACCESS_TOKEN_ENV_VAR: &str = "YAHOO_ACCESS_TOKEN";
pub const REFRESH_TOKEN_ENV_VAR: &str = "YAHOO_REFRESH_TOKEN";
pub const TIMEOUT_ENV_VAR: &str = "YAHOO_HTTP_TIMEOUT_SECS";

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub tokens: TokenState,
    pub timeout: Option<Duration>,
}

impl Config {
    /// Read `YAHOO_*` variables from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any name -> value lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let require = |name: &str| {
            get(name).ok_or_else(|| YahooError::MissingCredentials {
                env_var: name.to_string(),
            })
        };

        let mut credentials =
            Credentials::new(require(CONSUMER_KEY_ENV_VAR)?, require(CONSUMER_SECRET_ENV_VAR)?);
        if let Some(redirect_uri) = get(REDIRECT_URI_ENV_VAR) {
            credentials = credentials.with_redirect_uri(redirect_uri);
        }

        let tokens = TokenState::new(get(ACCESS_TOKEN_ENV_VAR), get(REFRESH_TOKEN_ENV_VAR));

        // Unparseable timeouts are ignored rather than failing start-up.
        let timeout = get(TIMEOUT_ENV_VAR)
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Ok(Self {
            credentials,
            tokens,
            timeout,
        })
    }
}
