//! HTTP transport: one request/response cycle, no interpretation.
//!
//! The same transport serves the token endpoint (form body, Basic auth) and
//! the data endpoint (query-string signature or bearer header), so it never
//! looks at status codes, parses JSON or retries.

use async_trait::async_trait;
use reqwest::{header::HeaderMap, Client, Method};
use std::time::Duration;
use tracing::debug;

use crate::Result;

#[cfg(test)]
mod tests;

#[cfg(test)]
pub(crate) mod mock;

/// Base path for Yahoo Fantasy Sports v2 API.
pub const API_BASE_URL: &str = "https://fantasysports.yahooapis.com/fantasy/v2";

/// Host serving the OAuth2 authorization and token endpoints.
pub const AUTH_BASE_URL: &str = "https://api.login.yahoo.com";

const USER_AGENT: &str = concat!("yahoo-fantasy/", env!("CARGO_PKG_VERSION"));

/// A fully prepared outgoing request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }
}

/// Raw status and accumulated body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform exactly one request. Socket-level failures are `Transport` errors.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a client. `timeout` bounds each request; `None` waits indefinitely.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

/// `url` up to its query string, which may carry OAuth signing parameters.
pub(crate) fn url_without_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(base, _)| base)
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        debug!(
            method = %request.method,
            url = %url_without_query(&request.url),
            "sending request"
        );

        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let mut response = builder.send().await?;
        let status = response.status().as_u16();

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            body.extend_from_slice(&chunk);
        }

        debug!(status, bytes = body.len(), "response received");
        Ok(HttpResponse { status, body })
    }
}
