//! CLI argument definitions and parsing.

pub mod types;

use clap::{Parser, Subcommand, ValueEnum};
use reqwest::Method;
use std::path::PathBuf;
use types::{LeagueKey, PlayerKey, Week};

#[derive(Debug, Parser)]
#[clap(
    name = "yahoo-fantasy",
    version,
    about = "Yahoo Fantasy Sports API client",
    long_about = "Query Yahoo Fantasy Sports leagues from the command line.\n\n\
                  Set YAHOO_CONSUMER_KEY and YAHOO_CONSUMER_SECRET, run `auth url`, \
                  then `auth exchange <code>` once to store tokens."
)]
pub struct YahooCli {
    /// Verbose logging to stderr (-v debug, -vv trace).
    #[clap(long, short, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Token file (default: ~/.config/yahoo-fantasy/tokens.json).
    #[clap(long, global = true)]
    pub token_file: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// OAuth2 authorization flow.
    Auth {
        #[clap(subcommand)]
        cmd: AuthCmd,
    },

    /// League metadata and sub-resources.
    League {
        #[clap(subcommand)]
        cmd: LeagueCmd,
    },

    /// The logged-in user and their games.
    User {
        /// Sub-resources to include, e.g. `--out games,leagues`.
        #[clap(long, value_delimiter = ',')]
        out: Vec<String>,
    },

    /// Send a request to any API URL and print the raw response tree.
    Raw {
        #[clap(value_enum, ignore_case = true)]
        method: RawMethod,

        url: String,

        /// XML request body (POST only).
        #[clap(long)]
        body: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum AuthCmd {
    /// Print the URL where access is granted.
    Url,

    /// Trade the code shown after granting access for tokens.
    Exchange { code: String },

    /// Refresh the stored access token.
    Refresh,
}

#[derive(Debug, Subcommand)]
pub enum LeagueCmd {
    /// League metadata only.
    Meta { league_key: LeagueKey },

    /// Scoring, roster positions and divisions.
    Settings { league_key: LeagueKey },

    Standings { league_key: LeagueKey },

    /// Head-to-head matchups for a week (default: current week).
    Scoreboard {
        league_key: LeagueKey,

        #[clap(long, short)]
        week: Option<Week>,
    },

    Teams { league_key: LeagueKey },

    DraftResults { league_key: LeagueKey },

    Transactions { league_key: LeagueKey },

    /// Stats for specific players (repeatable): `-p nfl.p.30977 -p nfl.p.31002`.
    Players {
        league_key: LeagueKey,

        #[clap(long = "player-key", short = 'p', required = true)]
        player_keys: Vec<PlayerKey>,

        #[clap(long, short)]
        week: Option<Week>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RawMethod {
    Get,
    Post,
}

impl From<RawMethod> for Method {
    fn from(method: RawMethod) -> Self {
        match method {
            RawMethod::Get => Method::GET,
            RawMethod::Post => Method::POST,
        }
    }
}
