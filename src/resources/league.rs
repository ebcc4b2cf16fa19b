//! League resource: `/league/{league_key}/...`

use reqwest::Method;
use serde_json::Value;

use crate::yahoo::engine::RequestEngine;
use crate::yahoo::mappers::{
    map_draft, map_players, map_scoreboard, map_settings, map_standings, map_teams,
    map_transactions,
};
use crate::yahoo::normalize::{normalize_object, DomainObject};
use crate::{Result, YahooError};

/// Every call returns the league metadata with one sub-resource attached.
pub struct LeagueResource<'a> {
    engine: &'a RequestEngine,
}

/// League metadata plus the raw `league[1]` subtree, if any.
fn split_league(tree: &Value) -> Result<(DomainObject, Option<&Value>)> {
    let league = tree
        .pointer("/fantasy_content/league")
        .ok_or_else(|| YahooError::shape("fantasy_content.league"))?;
    let meta = league
        .get(0)
        .map(normalize_object)
        .ok_or_else(|| YahooError::shape("fantasy_content.league[0]"))?;
    Ok((meta, league.get(1)))
}

fn child<'v>(subtree: Option<&'v Value>, key: &str) -> Option<&'v Value> {
    subtree.and_then(|s| s.get(key))
}

impl<'a> LeagueResource<'a> {
    pub(crate) fn new(engine: &'a RequestEngine) -> Self {
        Self { engine }
    }

    fn url(&self, league_key: &str, path: &str) -> String {
        format!("{}/league/{}/{}", self.engine.api_base_url(), league_key, path)
    }

    async fn get(&self, url: &str) -> Result<Value> {
        self.engine.request(Method::GET, url, None).await
    }

    pub async fn meta(&self, league_key: &str) -> Result<DomainObject> {
        let tree = self.get(&self.url(league_key, "metadata")).await?;
        let (meta, _) = split_league(&tree)?;
        Ok(meta)
    }

    pub async fn settings(&self, league_key: &str) -> Result<DomainObject> {
        let tree = self.get(&self.url(league_key, "settings")).await?;
        let (mut league, subtree) = split_league(&tree)?;
        let raw = child(subtree, "settings").and_then(|s| s.get(0));
        league.insert("settings".to_string(), Value::Object(map_settings(raw)));
        Ok(league)
    }

    pub async fn standings(&self, league_key: &str) -> Result<DomainObject> {
        let tree = self.get(&self.url(league_key, "standings")).await?;
        let (mut league, subtree) = split_league(&tree)?;
        let raw = child(subtree, "standings")
            .and_then(|s| s.get(0))
            .and_then(|s| s.get("teams"));
        league.insert("standings".to_string(), Value::Array(map_standings(raw)));
        Ok(league)
    }

    /// Head-to-head leagues only. `week` defaults to the current week.
    pub async fn scoreboard(&self, league_key: &str, week: Option<u32>) -> Result<DomainObject> {
        let mut path = "scoreboard".to_string();
        if let Some(week) = week {
            path.push_str(&format!(";week={}", week));
        }
        let tree = self.get(&self.url(league_key, &path)).await?;
        let (mut league, subtree) = split_league(&tree)?;
        let scoreboard = map_scoreboard(child(subtree, "scoreboard"));
        league.insert("scoreboard".to_string(), Value::Object(scoreboard));
        Ok(league)
    }

    pub async fn teams(&self, league_key: &str) -> Result<DomainObject> {
        let tree = self.get(&self.url(league_key, "teams")).await?;
        let (mut league, subtree) = split_league(&tree)?;
        let teams = map_teams(child(subtree, "teams"));
        league.insert("teams".to_string(), Value::Array(teams));
        Ok(league)
    }

    pub async fn draft_results(&self, league_key: &str) -> Result<DomainObject> {
        let tree = self.get(&self.url(league_key, "draftresults")).await?;
        let (mut league, subtree) = split_league(&tree)?;
        let draft = map_draft(child(subtree, "draft_results"));
        league.insert("draft_results".to_string(), Value::Array(draft));
        Ok(league)
    }

    pub async fn transactions(&self, league_key: &str) -> Result<DomainObject> {
        let tree = self.get(&self.url(league_key, "transactions")).await?;
        let (mut league, subtree) = split_league(&tree)?;
        let transactions = map_transactions(child(subtree, "transactions"));
        league.insert("transactions".to_string(), Value::Array(transactions));
        Ok(league)
    }

    /// Stats for specific players in the league, optionally for one week.
    pub async fn players(
        &self,
        league_key: &str,
        player_keys: &[String],
        week: Option<u32>,
    ) -> Result<DomainObject> {
        let mut path = format!("players;player_keys={}", player_keys.join(","));
        if let Some(week) = week {
            path.push_str(&format!(";week={}", week));
        }
        path.push_str("/stats");

        let tree = self.get(&self.url(league_key, &path)).await?;
        let (mut league, subtree) = split_league(&tree)?;
        let players = map_players(child(subtree, "players"));
        league.insert("players".to_string(), Value::Array(players));
        Ok(league)
    }
}
