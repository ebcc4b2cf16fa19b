//! Request orchestration: choose auth mode, send, detect token expiry,
//! refresh once and retry.

use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use super::http::{HttpRequest, Transport};
use crate::auth::signer::{encode_pairs, SignatureParams};
use crate::auth::{TokenManager, TokenState};
use crate::{Result, YahooError};


/// Refresh-and-retry rounds allowed per request.
const MAX_REFRESH_RETRIES: usize = 1;

const TOKEN_EXPIRED: &str = "token_expired";

pub struct RequestEngine {
    tokens: Arc<TokenManager>,
    transport: Arc<dyn Transport>,
    api_base_url: String,
}

/// How a parsed response body is handled.
#[derive(Debug)]
enum Outcome {
    Tree(Value),
    TokenExpired,
    Failed(Value),
}

impl RequestEngine {
    pub fn new(
        tokens: Arc<TokenManager>,
        transport: Arc<dyn Transport>,
        api_base_url: impl Into<String>,
    ) -> Self {
        Self {
            tokens,
            transport,
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn tokens(&self) -> &Arc<TokenManager> {
        &self.tokens
    }

    /// Root of the data endpoint, e.g. `https://fantasysports.yahooapis.com/fantasy/v2`.
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Send one authenticated request and return the parsed tree.
    ///
    /// A `token_expired` error triggers a single refresh and retry; a second
    /// expiry surfaces as `Auth`.
    pub async fn request(&self, method: Method, url: &str, body: Option<&str>) -> Result<Value> {
        let mut refreshes = 0;
        loop {
            let snapshot = self.tokens.snapshot();
            let request = self.prepare(method.clone(), url, body, &snapshot.tokens)?;
            debug!(
                method = %method,
                url,
                bearer = snapshot.tokens.is_bearer(),
                "dispatching api request"
            );

            let response = self.transport.send(request).await?;
            let tree: Value = serde_json::from_slice(&response.body)?;

            match classify(tree) {
                Outcome::Tree(tree) => return Ok(tree),
                Outcome::Failed(error) => {
                    warn!(status = response.status, error = %error, "api returned an error");
                    return Err(YahooError::Api(error));
                }
                Outcome::TokenExpired if refreshes < MAX_REFRESH_RETRIES => {
                    warn!(url, "access token expired, refreshing");
                    self.tokens.refresh_after(&snapshot).await?;
                    refreshes += 1;
                }
                Outcome::TokenExpired => {
                    return Err(YahooError::auth("access token expired again after refresh"));
                }
            }
        }
    }

    /// Build the outgoing request for the current auth mode.
    fn prepare(
        &self,
        method: Method,
        url: &str,
        body: Option<&str>,
        tokens: &TokenState,
    ) -> Result<HttpRequest> {
        let mut parsed = Url::parse(url).map_err(|e| YahooError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let mut query: Vec<(String, String)> = parsed
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        if !query.iter().any(|(k, _)| k == "format") {
            query.push(("format".to_string(), "json".to_string()));
        }
        parsed.set_query(None);
        parsed.set_fragment(None);
        let base = parsed.as_str();

        let mut request = match &tokens.access_token {
            None => {
                let credentials = self.tokens.credentials();
                let mut params = SignatureParams::fresh(&credentials.consumer_key);
                for (k, v) in query {
                    params.insert(k, v);
                }
                let signed = params.sign(method.as_str(), base, &credentials.consumer_secret);
                HttpRequest::new(method, format!("{}?{}", base, signed.to_query_string()))
            }
            Some(access_token) => {
                let query_string =
                    encode_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
                let mut request = HttpRequest::new(method, format!("{}?{}", base, query_string));
                request.headers.insert(
                    AUTHORIZATION,
                    HeaderValue::from_str(&format!("Bearer {}", access_token))?,
                );
                request
            }
        };

        if let Some(body) = body {
            request
                .headers
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/xml"));
            request.body = Some(body.to_string());
        }
        Ok(request)
    }
}

fn classify(tree: Value) -> Outcome {
    let error = tree.get("error").or_else(|| tree.get("err"));
    match error {
        None => Outcome::Tree(tree),
        Some(error) if is_token_expired(error) => Outcome::TokenExpired,
        Some(error) => Outcome::Failed(error.clone()),
    }
}

/// Case-insensitive `token_expired` in the error description.
pub fn is_token_expired(error: &Value) -> bool {
    let description = match error {
        Value::String(s) => Some(s.as_str()),
        Value::Object(map) => map.get("description").and_then(Value::as_str),
        _ => None,
    };
    description
        .map(|d| d.to_ascii_lowercase().contains(TOKEN_EXPIRED))
        .unwrap_or(false)
}
