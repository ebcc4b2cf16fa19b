//! Type-safe wrappers for Yahoo resource keys and weeks.

use crate::error::{Result, YahooError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;


/// `{game}.{marker}.{id}` with a non-empty alphanumeric game and numeric id.
fn validate_key(s: &str, marker: &str, kind: &'static str) -> Result<String> {
    let s = s.trim();
    let invalid = || YahooError::InvalidKey {
        kind,
        value: s.to_string(),
    };

    let parts: Vec<&str> = s.split('.').collect();
    match parts.as_slice() {
        [game, m, id]
            if !game.is_empty()
                && game.chars().all(|c| c.is_ascii_alphanumeric())
                && *m == marker
                && !id.is_empty()
                && id.chars().all(|c| c.is_ascii_digit()) =>
        {
            Ok(s.to_string())
        }
        _ => Err(invalid()),
    }
}

/// Yahoo league key, e.g. `nfl.l.12345` or `449.l.12345`.
///
/// ```rust
/// use yahoo_fantasy::LeagueKey;
///
/// let key: LeagueKey = "nfl.l.12345".parse().unwrap();
/// assert_eq!(key.as_str(), "nfl.l.12345");
/// assert!("12345".parse::<LeagueKey>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeagueKey(String);

impl LeagueKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LeagueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LeagueKey {
    type Err = YahooError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(validate_key(s, "l", "league")?))
    }
}

/// Yahoo player key, e.g. `nfl.p.30977`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerKey(String);

impl PlayerKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlayerKey {
    type Err = YahooError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(validate_key(s, "p", "player")?))
    }
}

/// Type-safe wrapper for Week numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Week(pub u32);

impl Week {
    pub fn new(week: u32) -> Self {
        Self(week)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Week {
    type Err = YahooError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}
