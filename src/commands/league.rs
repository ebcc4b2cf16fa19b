//! `league <sub> <league_key>`

use serde_json::Value;

use crate::cli::LeagueCmd;
use crate::client::YahooFantasy;
use crate::Result;

pub async fn handle_league(yf: &YahooFantasy, cmd: LeagueCmd) -> Result<Value> {
    let league = yf.league();
    let result = match cmd {
        LeagueCmd::Meta { league_key } => league.meta(league_key.as_str()).await?,
        LeagueCmd::Settings { league_key } => league.settings(league_key.as_str()).await?,
        LeagueCmd::Standings { league_key } => league.standings(league_key.as_str()).await?,
        LeagueCmd::Scoreboard { league_key, week } => {
            league
                .scoreboard(league_key.as_str(), week.map(|w| w.as_u32()))
                .await?
        }
        LeagueCmd::Teams { league_key } => league.teams(league_key.as_str()).await?,
        LeagueCmd::DraftResults { league_key } => {
            league.draft_results(league_key.as_str()).await?
        }
        LeagueCmd::Transactions { league_key } => {
            league.transactions(league_key.as_str()).await?
        }
        LeagueCmd::Players {
            league_key,
            player_keys,
            week,
        } => {
            let keys: Vec<String> = player_keys.iter().map(|k| k.to_string()).collect();
            league
                .players(league_key.as_str(), &keys, week.map(|w| w.as_u32()))
                .await?
        }
    };
    Ok(Value::Object(result))
}
