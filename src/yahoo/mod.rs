//! Yahoo Fantasy Sports API client internals.
//!
//! - `http`: transport trait and the reqwest implementation
//! - `engine`: authenticated requests with one refresh-and-retry on expiry
//! - `normalize`: reshaping of Yahoo's count-keyed and `[meta, children]` JSON
//! - `mappers`: per-resource reshaping into the public schema

pub mod engine;
pub mod http;
pub mod mappers;
pub mod normalize;

pub use engine::RequestEngine;
pub use http::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use normalize::DomainObject;
