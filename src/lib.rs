//! Yahoo Fantasy Sports API client
//!
//! An async Rust client for the Yahoo Fantasy Sports v2 API, covering the
//! OAuth flows, request signing, token refresh, and the reshaping of Yahoo's
//! index-keyed JSON into plain lists and objects.
//!
//! ## Features
//!
//! - **Two auth modes**: OAuth1.0a HMAC-SHA1 signed requests until a user
//!   token exists, OAuth2 bearer tokens afterwards
//! - **Token lifecycle**: code exchange, refresh, injection of stored tokens,
//!   and a persistence callback fired after every change
//! - **Single-flight refresh**: concurrent requests that hit an expired token
//!   share one refresh, and each request retries at most once
//! - **Normalized output**: `count`-keyed collections become lists and
//!   `[meta, children]` arrays become merged objects
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use yahoo_fantasy::{Credentials, YahooFantasy};
//!
//! # async fn example() -> yahoo_fantasy::Result<()> {
//! let yf = YahooFantasy::builder(Credentials::new("consumer-key", "consumer-secret"))
//!     .on_token(|payload| println!("store me: {payload}"))
//!     .build()?;
//!
//! println!("Grant access at {}", yf.authorization_url());
//! yf.exchange_code("code-from-yahoo").await?;
//!
//! let standings = yf.league().standings("nfl.l.12345").await?;
//! for team in standings["standings"].as_array().into_iter().flatten() {
//!     println!("{} {}", team["rank"], team["name"]);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export YAHOO_CONSUMER_KEY=dj0yJmk9...
//! export YAHOO_CONSUMER_SECRET=...
//! ```

pub mod auth;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod resources;
pub mod yahoo;

// Re-export commonly used types
pub use auth::{Credentials, TokenCallback, TokenManager, TokenState};
pub use cli::types::{LeagueKey, PlayerKey, Week};
pub use client::{with_callback, ClientBuilder, YahooFantasy};
pub use config::Config;
pub use error::{Result, YahooError};
pub use yahoo::{DomainObject, RequestEngine};
