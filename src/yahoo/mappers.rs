//! Per-resource mappers from raw subtrees to the public schema.
//!
//! Each mapper takes the raw subtree for one resource kind (or `None` when
//! the response omitted it) and never fails: absent parts become empty lists.

use serde_json::{json, Value};

use super::normalize::{
    items, lift, lift_positional, list_field, normalize, normalize_object, DomainObject,
};


fn into_object(value: Value) -> DomainObject {
    match value {
        Value::Object(map) => map,
        _ => DomainObject::new(),
    }
}

/// Normalize a collection and strip the per-item wrapper key.
fn collection(raw: Option<&Value>, wrapper: &str) -> Vec<Value> {
    let normalized = raw.map(normalize);
    items(normalized.as_ref(), wrapper)
}

fn same_id(a: Option<&Value>, b: Option<&Value>) -> bool {
    let key = |v: &Value| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string());
    match (a, b) {
        (Some(a), Some(b)) => key(a) == key(b),
        _ => false,
    }
}

/// League settings (`league[1].settings[0]`).
///
/// `stat_categories` becomes a list of stats, each carrying the `value` of
/// its matching stat modifier; `stat_modifiers` is folded away.
pub fn map_settings(raw: Option<&Value>) -> DomainObject {
    let mut settings = raw.map(normalize_object).unwrap_or_default();

    let modifiers = settings
        .remove("stat_modifiers")
        .map(|m| items(m.get("stats"), "stat"))
        .unwrap_or_default();
    let categories = settings
        .get("stat_categories")
        .map(|c| items(c.get("stats"), "stat"))
        .unwrap_or_default()
        .into_iter()
        .map(|mut category| {
            let value = modifiers
                .iter()
                .find(|m| same_id(m.get("stat_id"), category.get("stat_id")))
                .and_then(|m| m.get("value"))
                .cloned();
            if let (Some(value), Some(obj)) = (value, category.as_object_mut()) {
                obj.insert("value".to_string(), value);
            }
            category
        })
        .collect();
    settings.insert("stat_categories".to_string(), Value::Array(categories));

    list_field(&mut settings, "roster_positions", "roster_position");
    list_field(&mut settings, "divisions", "division");
    settings
}

/// Team metadata with `managers` and `team_logos` as plain lists.
pub fn map_team(mut team: DomainObject) -> DomainObject {
    list_field(&mut team, "managers", "manager");
    list_field(&mut team, "team_logos", "team_logo");
    team
}

pub fn map_teams(raw: Option<&Value>) -> Vec<Value> {
    collection(raw, "team")
        .into_iter()
        .map(|team| Value::Object(map_team(into_object(team))))
        .collect()
}

/// Collapse a normalized team's `team_standings` into the team itself.
pub fn flatten_standing(mut team: DomainObject) -> DomainObject {
    lift(&mut team, "team_standings");
    team
}

/// Standings teams (`league[1].standings[0].teams`).
pub fn map_standings(raw: Option<&Value>) -> Vec<Value> {
    collection(raw, "team")
        .into_iter()
        .map(|team| Value::Object(map_team(flatten_standing(into_object(team)))))
        .collect()
}

fn map_matchup(mut matchup: DomainObject) -> DomainObject {
    lift_positional(&mut matchup);
    let teams = items(matchup.get("teams"), "team")
        .into_iter()
        .map(|team| Value::Object(map_team(into_object(team))))
        .collect();
    matchup.insert("teams".to_string(), Value::Array(teams));
    list_field(&mut matchup, "stat_winners", "stat_winner");
    matchup
}

/// Scoreboard (`league[1].scoreboard`) as `{week, matchups}`.
pub fn map_scoreboard(raw: Option<&Value>) -> DomainObject {
    let mut board = raw.map(normalize_object).unwrap_or_default();
    let week = board.remove("week").unwrap_or(Value::Null);
    lift_positional(&mut board);

    let matchups: Vec<Value> = items(board.get("matchups"), "matchup")
        .into_iter()
        .map(|m| Value::Object(map_matchup(into_object(m))))
        .collect();

    into_object(json!({ "week": week, "matchups": matchups }))
}

/// Draft picks (`league[1].draft_results`).
pub fn map_draft(raw: Option<&Value>) -> Vec<Value> {
    collection(raw, "draft_result")
}

/// Player with `eligible_positions` as strings and stats as a list.
pub fn map_player(mut player: DomainObject) -> DomainObject {
    list_field(&mut player, "eligible_positions", "position");
    if let Some(Value::Object(stats)) = player.get_mut("player_stats") {
        list_field(stats, "stats", "stat");
    }
    player
}

pub fn map_players(raw: Option<&Value>) -> Vec<Value> {
    collection(raw, "player")
        .into_iter()
        .map(|player| Value::Object(map_player(into_object(player))))
        .collect()
}

/// Transactions (`league[1].transactions`), each with its `players` list.
pub fn map_transactions(raw: Option<&Value>) -> Vec<Value> {
    collection(raw, "transaction")
        .into_iter()
        .map(|transaction| {
            let mut transaction = into_object(transaction);
            let players = items(transaction.get("players"), "player")
                .into_iter()
                .map(|player| Value::Object(map_player(into_object(player))))
                .collect();
            transaction.insert("players".to_string(), Value::Array(players));
            Value::Object(transaction)
        })
        .collect()
}

fn map_game(mut game: DomainObject) -> DomainObject {
    if game.contains_key("leagues") {
        list_field(&mut game, "leagues", "league");
    }
    if game.contains_key("teams") {
        let teams = items(game.get("teams"), "team")
            .into_iter()
            .map(|team| Value::Object(map_team(into_object(team))))
            .collect();
        game.insert("teams".to_string(), Value::Array(teams));
    }
    game
}

/// One user with a `games` list.
pub fn map_user(mut user: DomainObject) -> DomainObject {
    let games = items(user.get("games"), "game")
        .into_iter()
        .map(|game| Value::Object(map_game(into_object(game))))
        .collect();
    user.insert("games".to_string(), Value::Array(games));
    user
}

/// Users collection (`fantasy_content.users`).
pub fn map_users(raw: Option<&Value>) -> Vec<Value> {
    collection(raw, "user")
        .into_iter()
        .map(|user| Value::Object(map_user(into_object(user))))
        .collect()
}
