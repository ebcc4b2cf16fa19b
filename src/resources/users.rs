//! Users collection: the logged-in user and their games.

use reqwest::Method;
use serde_json::Value;

use crate::yahoo::engine::RequestEngine;
use crate::yahoo::mappers::map_users;
use crate::yahoo::normalize::DomainObject;
use crate::{Result, YahooError};

pub struct UsersCollection<'a> {
    engine: &'a RequestEngine,
}

impl<'a> UsersCollection<'a> {
    pub(crate) fn new(engine: &'a RequestEngine) -> Self {
        Self { engine }
    }

    /// `users;use_login=1[;out=..]`, e.g. `&["games", "leagues"]`.
    pub fn url(&self, subresources: &[String]) -> String {
        let mut url = format!("{}/users;use_login=1", self.engine.api_base_url());
        if !subresources.is_empty() {
            url.push_str(&format!(";out={}", subresources.join(",")));
        }
        url
    }

    /// The current user with a `games` list.
    pub async fn fetch(&self, subresources: &[String]) -> Result<DomainObject> {
        let tree = self
            .engine
            .request(Method::GET, &self.url(subresources), None)
            .await?;

        let users = tree
            .pointer("/fantasy_content/users")
            .ok_or_else(|| YahooError::shape("fantasy_content.users"))?;
        match map_users(Some(users)).into_iter().next() {
            Some(Value::Object(user)) => Ok(user),
            _ => Err(YahooError::shape("fantasy_content.users[0].user")),
        }
    }
}
