//! OAuth1.0a HMAC-SHA1 request signing.
//!
//! Used only while no OAuth2 access token exists. The consumer secret is the
//! sole signing key (two-legged, empty token secret).

use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha1::Sha1;
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha1 = Hmac<Sha1>;

pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
pub const OAUTH_VERSION: &str = "1.0";
pub const SIGNATURE_KEY: &str = "oauth_signature";

/// Random bytes per nonce before base64 encoding.
const NONCE_BYTES: usize = 12;

/// Ordered OAuth1.0a parameter set for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureParams {
    params: BTreeMap<String, String>,
}

impl SignatureParams {
    /// Build the five `oauth_*` fields plus `format=json`.
    pub fn new(consumer_key: &str, nonce: &str, timestamp: u64) -> Self {
        let mut params = BTreeMap::new();
        params.insert("format".to_string(), "json".to_string());
        params.insert("oauth_consumer_key".to_string(), consumer_key.to_string());
        params.insert(
            "oauth_signature_method".to_string(),
            SIGNATURE_METHOD.to_string(),
        );
        params.insert("oauth_timestamp".to_string(), timestamp.to_string());
        params.insert("oauth_nonce".to_string(), nonce.to_string());
        params.insert("oauth_version".to_string(), OAUTH_VERSION.to_string());
        Self { params }
    }

    /// Parameters with a fresh nonce and the current Unix time.
    pub fn fresh(consumer_key: &str) -> Self {
        Self::new(consumer_key, &generate_nonce(), unix_timestamp())
    }

    /// Add a request parameter (e.g. an existing query pair) to the signed set.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Compute the signature and append it as `oauth_signature`.
    pub fn sign(mut self, method: &str, url: &str, consumer_secret: &str) -> Self {
        let signature = sign(method, url, &self.params, consumer_secret);
        self.params.insert(SIGNATURE_KEY.to_string(), signature);
        self
    }

    /// Percent-encoded `k=v&...` query string of the whole set.
    pub fn to_query_string(&self) -> String {
        encode_pairs(self.params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}

/// HMAC-SHA1 signature over the OAuth1.0a base string.
///
/// `url` must not carry a query string; query parameters belong in `params`.
/// Any `oauth_signature` already present in `params` is ignored.
pub fn sign(
    method: &str,
    url: &str,
    params: &BTreeMap<String, String>,
    consumer_secret: &str,
) -> String {
    let base = base_string(method, url, params);
    let key = format!("{}&", percent_encode(consumer_secret));

    let mut mac =
        HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(base.as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}

/// `METHOD&enc(url)&enc(sorted params)`.
pub fn base_string(method: &str, url: &str, params: &BTreeMap<String, String>) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .filter(|(k, _)| k.as_str() != SIGNATURE_KEY)
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        percent_encode(url),
        percent_encode(&param_string)
    )
}

/// 12 random bytes, base64 encoded.
pub fn generate_nonce() -> String {
    let mut bytes = [0u8; NONCE_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    STANDARD.encode(bytes)
}

pub fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// RFC 3986 encoding: everything except `A-Z a-z 0-9 - . _ ~`.
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

pub(crate) fn encode_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    pairs
        .into_iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
