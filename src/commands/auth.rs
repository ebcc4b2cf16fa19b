//! `auth url | exchange | refresh`

use serde_json::{json, Value};

use crate::auth::TokenState;
use crate::cli::AuthCmd;
use crate::client::YahooFantasy;
use crate::Result;

/// Token values never reach stdout; they are persisted by the token callback.
fn token_summary(tokens: &TokenState) -> Value {
    json!({
        "authorized": tokens.is_bearer(),
        "refresh_token": tokens.refresh_token.is_some(),
    })
}

pub async fn handle_auth(yf: &YahooFantasy, cmd: AuthCmd) -> Result<Value> {
    match cmd {
        AuthCmd::Url => Ok(json!({ "authorization_url": yf.authorization_url() })),
        AuthCmd::Exchange { code } => {
            let tokens = yf.exchange_code(code.trim()).await?;
            Ok(token_summary(&tokens))
        }
        AuthCmd::Refresh => {
            let tokens = yf.refresh_token().await?;
            Ok(token_summary(&tokens))
        }
    }
}
