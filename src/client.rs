//! `YahooFantasy`: the public entry point.
//!
//! Owns one [`RequestEngine`] (and through it the token manager) and hands out
//! borrowed resource handles:
//!
//! ```rust,no_run
//! use yahoo_fantasy::{Credentials, YahooFantasy};
//!
//! # async fn example() -> yahoo_fantasy::Result<()> {
//! let yf = YahooFantasy::new(Credentials::new("consumer-key", "consumer-secret"))?;
//! yf.set_user_token("access-token");
//!
//! let league = yf.league().settings("nfl.l.12345").await?;
//! println!("{}", league["settings"]["draft_type"]);
//! # Ok(())
//! # }
//! ```

use reqwest::Method;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::{Credentials, TokenCallback, TokenManager, TokenState};
use crate::config::Config;
use crate::resources::{LeagueResource, UsersCollection};
use crate::yahoo::http::{ReqwestTransport, Transport, API_BASE_URL, AUTH_BASE_URL};
use crate::yahoo::RequestEngine;
use crate::{Result, YahooError};


pub struct ClientBuilder {
    credentials: Credentials,
    tokens: TokenState,
    api_base_url: String,
    auth_base_url: String,
    transport: Option<Arc<dyn Transport>>,
    timeout: Option<Duration>,
    on_token: Option<TokenCallback>,
}

impl ClientBuilder {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            tokens: TokenState::default(),
            api_base_url: API_BASE_URL.to_string(),
            auth_base_url: AUTH_BASE_URL.to_string(),
            transport: None,
            timeout: None,
            on_token: None,
        }
    }

    /// Start from a previously stored token pair.
    pub fn tokens(mut self, tokens: TokenState) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn auth_base_url(mut self, url: impl Into<String>) -> Self {
        self.auth_base_url = url.into();
        self
    }

    /// Replace the reqwest transport. `timeout` is ignored when set.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Called with the raw token payload after every exchange or refresh.
    pub fn on_token<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.on_token = Some(Arc::new(callback));
        self
    }

    pub fn build(self) -> Result<YahooFantasy> {
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(self.timeout)?),
        };

        let mut manager =
            TokenManager::new(self.credentials, self.auth_base_url, transport.clone());
        if let Some(callback) = self.on_token {
            manager = manager.with_callback(callback);
        }
        if let Some(token) = self.tokens.access_token {
            manager.set_access_token(token);
        }
        if let Some(token) = self.tokens.refresh_token {
            manager.set_refresh_token(token);
        }

        let engine = RequestEngine::new(Arc::new(manager), transport, self.api_base_url);
        Ok(YahooFantasy { engine })
    }
}

pub struct YahooFantasy {
    engine: RequestEngine,
}

impl YahooFantasy {
    /// Client against the production endpoints with no token yet.
    pub fn new(credentials: Credentials) -> Result<Self> {
        ClientBuilder::new(credentials).build()
    }

    pub fn builder(credentials: Credentials) -> ClientBuilder {
        ClientBuilder::new(credentials)
    }

    /// Builder seeded from environment configuration.
    pub fn from_config(config: &Config) -> ClientBuilder {
        let builder = ClientBuilder::new(config.credentials.clone()).tokens(config.tokens.clone());
        match config.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        }
    }

    pub fn league(&self) -> LeagueResource<'_> {
        LeagueResource::new(&self.engine)
    }

    pub fn users(&self) -> UsersCollection<'_> {
        UsersCollection::new(&self.engine)
    }

    pub fn engine(&self) -> &RequestEngine {
        &self.engine
    }

    /// Raw access to any endpoint; returns the parsed, unnormalized tree.
    pub async fn api(&self, method: Method, url: &str, body: Option<&str>) -> Result<Value> {
        self.engine.request(method, url, body).await
    }

    pub fn authorization_url(&self) -> String {
        self.engine.tokens().authorization_url()
    }

    pub async fn exchange_code(&self, code: &str) -> Result<TokenState> {
        self.engine.tokens().exchange_code(code).await
    }

    pub async fn refresh_token(&self) -> Result<TokenState> {
        self.engine.tokens().refresh().await
    }

    /// Alias for [`set_access_token`](Self::set_access_token).
    pub fn set_user_token(&self, token: impl Into<String>) {
        self.set_access_token(token);
    }

    pub fn set_access_token(&self, token: impl Into<String>) {
        self.engine.tokens().set_access_token(token);
    }

    pub fn set_refresh_token(&self, token: impl Into<String>) {
        self.engine.tokens().set_refresh_token(token);
    }

    pub fn tokens(&self) -> TokenState {
        self.engine.tokens().tokens()
    }
}

/// Await `future`, report its outcome to `callback`, and return it unchanged.
pub async fn with_callback<T, Fut, C>(future: Fut, callback: C) -> Result<T>
where
    Fut: Future<Output = Result<T>>,
    C: FnOnce(std::result::Result<&T, &YahooError>),
{
    let result = future.await;
    callback(result.as_ref());
    result
}
