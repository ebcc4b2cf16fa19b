//! OAuth2 token lifecycle: code exchange, refresh, injection.
//!
//! All writes go through one async gate so a refresh is never issued twice
//! for the same token. Callers that saw an expired token pass the snapshot
//! they observed to [`TokenManager::refresh_after`]; if another task already
//! refreshed while they waited, they share that outcome, success or failure.

use parking_lot::RwLock;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::credentials::{Credentials, TokenState};
use super::signer::encode_pairs;
use crate::yahoo::http::{HttpRequest, Transport};
use crate::{Result, YahooError};


/// Receives the raw token payload after every successful exchange or refresh.
pub type TokenCallback = Arc<dyn Fn(&Value) + Send + Sync>;

/// Token pair plus the counters used to detect concurrent refreshes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSnapshot {
    pub tokens: TokenState,
    /// Bumped on every token write.
    pub generation: u64,
    /// Bumped when a refresh attempt completes, successful or not.
    pub refresh_attempts: u64,
}

pub struct TokenManager {
    credentials: Credentials,
    auth_base_url: String,
    transport: Arc<dyn Transport>,
    state: RwLock<TokenSnapshot>,
    write_gate: Mutex<()>,
    last_refresh_error: parking_lot::Mutex<Option<String>>,
    on_token: Option<TokenCallback>,
}

impl fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenManager")
            .field("credentials", &self.credentials)
            .field("auth_base_url", &self.auth_base_url)
            .field("state", &*self.state.read())
            .finish_non_exhaustive()
    }
}

impl TokenManager {
    pub fn new(
        credentials: Credentials,
        auth_base_url: impl Into<String>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            credentials,
            auth_base_url: auth_base_url.into().trim_end_matches('/').to_string(),
            transport,
            state: RwLock::new(TokenSnapshot {
                tokens: TokenState::default(),
                generation: 0,
                refresh_attempts: 0,
            }),
            write_gate: Mutex::new(()),
            last_refresh_error: parking_lot::Mutex::new(None),
            on_token: None,
        }
    }

    /// Persist tokens somewhere after each exchange/refresh.
    pub fn with_callback(mut self, callback: TokenCallback) -> Self {
        self.on_token = Some(callback);
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn token_url(&self) -> String {
        format!("{}/oauth2/get_token", self.auth_base_url)
    }

    /// Where the end user must be sent to grant access.
    pub fn authorization_url(&self) -> String {
        format!(
            "{}/oauth2/request_auth?{}",
            self.auth_base_url,
            encode_pairs([
                ("client_id", self.credentials.consumer_key.as_str()),
                ("redirect_uri", self.credentials.redirect_uri_or_default()),
                ("response_type", "code"),
            ])
        )
    }

    pub fn snapshot(&self) -> TokenSnapshot {
        self.state.read().clone()
    }

    pub fn tokens(&self) -> TokenState {
        self.state.read().tokens.clone()
    }

    /// Inject an access token managed by the embedding application.
    pub fn set_access_token(&self, token: impl Into<String>) {
        let mut state = self.state.write();
        state.tokens.access_token = Some(token.into());
        state.generation += 1;
    }

    pub fn set_refresh_token(&self, token: impl Into<String>) {
        let mut state = self.state.write();
        state.tokens.refresh_token = Some(token.into());
        state.generation += 1;
    }

    /// Trade an authorization code for a token pair.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenState> {
        let _gate = self.write_gate.lock().await;
        info!("exchanging authorization code for tokens");

        let form = [
            ("client_id", self.credentials.consumer_key.as_str()),
            ("client_secret", self.credentials.consumer_secret.as_str()),
            ("redirect_uri", self.credentials.redirect_uri_or_default()),
            ("code", code),
            ("grant_type", "authorization_code"),
        ];
        let payload = self.request_tokens(encode_pairs(form)).await?;
        self.store(&payload, None)
    }

    /// Unconditionally refresh with the stored refresh token.
    pub async fn refresh(&self) -> Result<TokenState> {
        let _gate = self.write_gate.lock().await;
        self.refresh_locked().await
    }

    /// Refresh unless a refresh completed since `observed` was taken.
    ///
    /// Concurrent callers that observed the same expired token queue on the
    /// gate; only the first performs the round-trip. The others get the new
    /// tokens, or the same `Auth` error when that refresh failed.
    pub async fn refresh_after(&self, observed: &TokenSnapshot) -> Result<TokenState> {
        let _gate = self.write_gate.lock().await;
        {
            let current = self.state.read();
            if current.generation != observed.generation {
                debug!(
                    observed = observed.generation,
                    current = current.generation,
                    "token already refreshed, reusing"
                );
                return Ok(current.tokens.clone());
            }
            if current.refresh_attempts != observed.refresh_attempts {
                let message = self
                    .last_refresh_error
                    .lock()
                    .clone()
                    .unwrap_or_else(|| "token refresh failed".to_string());
                debug!(%message, "concurrent refresh failed, sharing error");
                return Err(YahooError::auth(message));
            }
        }
        self.refresh_locked().await
    }

    /// One refresh attempt; records its outcome for queued callers.
    async fn refresh_locked(&self) -> Result<TokenState> {
        let outcome = self.request_refresh().await;
        *self.last_refresh_error.lock() = outcome.as_ref().err().map(|e| match e {
            YahooError::Auth { message } => message.clone(),
            other => other.to_string(),
        });
        self.state.write().refresh_attempts += 1;
        outcome
    }

    async fn request_refresh(&self) -> Result<TokenState> {
        let refresh_token = self
            .state
            .read()
            .tokens
            .refresh_token
            .clone()
            .ok_or_else(|| YahooError::auth("no refresh token"))?;

        info!("refreshing access token");
        let form = [
            ("grant_type", "refresh_token"),
            ("redirect_uri", self.credentials.redirect_uri_or_default()),
            ("refresh_token", refresh_token.as_str()),
        ];
        let payload = self.request_tokens(encode_pairs(form)).await?;
        self.store(&payload, Some(refresh_token))
    }

    async fn request_tokens(&self, form_body: String) -> Result<Value> {
        let mut request = HttpRequest::new(Method::POST, self.token_url());
        request.headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        request.headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&self.credentials.basic_authorization())?,
        );
        request.body = Some(form_body);

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            warn!(status = response.status, "token endpoint rejected request");
            return Err(YahooError::auth(format!(
                "token endpoint returned {}: {}",
                response.status,
                response.body_text()
            )));
        }

        serde_json::from_slice(&response.body)
            .map_err(|e| YahooError::auth(format!("malformed token response: {}", e)))
    }

    /// Write both tokens in one step, then notify the callback.
    fn store(&self, payload: &Value, previous_refresh: Option<String>) -> Result<TokenState> {
        let access_token = payload
            .get("access_token")
            .and_then(Value::as_str)
            .ok_or_else(|| YahooError::auth("malformed token response: missing access_token"))?;
        let refresh_token = payload
            .get("refresh_token")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or(previous_refresh);

        let tokens = TokenState::new(Some(access_token.to_string()), refresh_token);
        {
            let mut state = self.state.write();
            state.tokens = tokens.clone();
            state.generation += 1;
        }

        if let Some(callback) = &self.on_token {
            callback(payload);
        }
        Ok(tokens)
    }
}
