//! OAuth plumbing: app credentials, request signing, and the token lifecycle.
//!
//! - `credentials`: consumer key/secret and the stored token pair
//! - `signer`: OAuth 1.0a HMAC-SHA1 signatures for app-only requests
//! - `token`: code exchange, refresh, and single-flight coordination

pub mod credentials;
pub mod signer;
pub mod token;

pub use credentials::{Credentials, TokenState, OUT_OF_BAND_REDIRECT};
pub use signer::SignatureParams;
pub use token::{TokenCallback, TokenManager, TokenSnapshot};
