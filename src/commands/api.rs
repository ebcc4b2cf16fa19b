//! `user` and `raw`

use reqwest::Method;
use serde_json::Value;

use crate::client::YahooFantasy;
use crate::Result;

pub async fn handle_user(yf: &YahooFantasy, out: &[String]) -> Result<Value> {
    Ok(Value::Object(yf.users().fetch(out).await?))
}

pub async fn handle_raw(
    yf: &YahooFantasy,
    method: Method,
    url: &str,
    body: Option<&str>,
) -> Result<Value> {
    yf.api(method, url, body).await
}
