//! Consumer credentials and the mutable OAuth2 token pair.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Redirect URI used when the application registered no callback.
pub const OUT_OF_BAND_REDIRECT: &str = "oob";

/// Yahoo application credentials. Fixed for the lifetime of a client.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub redirect_uri: Option<String>,
}

impl Credentials {
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            redirect_uri: None,
        }
    }

    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    /// The registered redirect URI, or `oob` when none was configured.
    pub fn redirect_uri_or_default(&self) -> &str {
        self.redirect_uri.as_deref().unwrap_or(OUT_OF_BAND_REDIRECT)
    }

    /// `Basic base64(key:secret)` value for the token endpoint.
    pub fn basic_authorization(&self) -> String {
        let raw = format!("{}:{}", self.consumer_key, self.consumer_secret);
        format!("Basic {}", STANDARD.encode(raw))
    }
}

// Keep the secret out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

/// OAuth2 token pair.
///
/// An absent access token means requests are signed with OAuth1.0a; once a
/// token is present every request uses the bearer header instead.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenState {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl TokenState {
    pub fn new(access_token: Option<String>, refresh_token: Option<String>) -> Self {
        Self {
            access_token,
            refresh_token,
        }
    }

    pub fn is_bearer(&self) -> bool {
        self.access_token.is_some()
    }
}

impl fmt::Debug for TokenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |t: &Option<String>| t.as_ref().map(|_| "<set>").unwrap_or("<none>");
        f.debug_struct("TokenState")
            .field("access_token", &mask(&self.access_token))
            .field("refresh_token", &mask(&self.refresh_token))
            .finish()
    }
}
