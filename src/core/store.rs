//! Token file persistence for the CLI.
//!
//! The file holds the last raw token payload (`access_token`,
//! `refresh_token`, `expires_in`, ...) merged over whatever was stored before,
//! so a refresh response without a `refresh_token` keeps the previous one.

use serde_json::{Map, Value};
use std::{
    fs,
    io::{Read, Write},
    path::{Path, PathBuf},
};

use crate::auth::TokenState;
use crate::Result;

/// Path: ~/.config/yahoo-fantasy/tokens.json
pub fn token_file_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".config");
        home
    });
    base.join("yahoo-fantasy").join("tokens.json")
}

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Write a string to file, creating parent directories.
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}

/// Stored tokens, or `None` when the file does not exist yet.
pub fn load_tokens(path: &Path) -> Result<Option<TokenState>> {
    match try_read_to_string(path) {
        Some(contents) => Ok(Some(serde_json::from_str(&contents)?)),
        None => Ok(None),
    }
}

pub fn save_token_payload(path: &Path, payload: &Value) -> Result<()> {
    let mut stored: Map<String, Value> = try_read_to_string(path)
        .and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or_default();

    if let Value::Object(fields) = payload {
        for (key, value) in fields {
            stored.insert(key.clone(), value.clone());
        }
    }

    let contents = serde_json::to_string_pretty(&Value::Object(stored))?;
    write_string(path, &contents)?;
    Ok(())
}
