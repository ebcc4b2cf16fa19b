//! Command implementations for the Yahoo Fantasy CLI.
//!
//! Handlers return the JSON to print so they can be exercised without a
//! terminal; `print_json` is the only place that writes to stdout.

pub mod api;
pub mod auth;
pub mod league;


use serde_json::Value;

use crate::Result;

/// Pretty JSON on stdout.
pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
