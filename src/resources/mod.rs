//! Endpoint wrappers: build a URL, call the engine, map the tree.

pub mod league;
pub mod users;

pub use league::LeagueResource;
pub use users::UsersCollection;
