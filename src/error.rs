//! Error types for the Yahoo Fantasy Sports client

use serde_json::Value;
use thiserror::Error;


pub type Result<T> = std::result::Result<T, YahooError>;

#[derive(Error, Debug)]
pub enum YahooError {
    #[error("HTTP transport failed: {0}")]
    Transport(String),

    #[error("JSON parsing failed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Yahoo API error: {}", api_error_description(.0))]
    Api(Value),

    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Credentials not provided and {env_var} environment variable not set")]
    MissingCredentials { env_var: String },

    #[error("Unexpected response shape: missing {path}")]
    UnexpectedShape { path: String },

    #[error("Invalid {kind} key: {value}")]
    InvalidKey { kind: &'static str, value: String },

    #[error("Invalid week: {0}")]
    InvalidWeek(#[from] std::num::ParseIntError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl YahooError {
    pub fn auth(message: impl Into<String>) -> Self {
        YahooError::Auth {
            message: message.into(),
        }
    }

    pub fn shape(path: impl Into<String>) -> Self {
        YahooError::UnexpectedShape { path: path.into() }
    }
}

impl From<reqwest::Error> for YahooError {
    fn from(err: reqwest::Error) -> Self {
        YahooError::Transport(err.to_string())
    }
}

fn api_error_description(payload: &Value) -> String {
    match payload {
        Value::String(s) => s.clone(),
        Value::Object(map) => map
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| payload.to_string()),
        other => other.to_string(),
    }
}
