//! HMAC-SHA256 request authentication.
//!
//! Every outbound request carries an auth block computed from the company
//! id, the API method name, and a millisecond timestamp:
//!
//! 1. Build the canonical string `{companyid}!{method}!{timestamp}`
//! 2. Compute HMAC-SHA256 keyed by the shared secret
//! 3. Hex-encode the digest, lowercase
//!
//! The block is constructed fresh per request and never persisted.

use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;

use crate::clock::Clock;
use crate::config::Credentials;

type HmacSha256 = Hmac<Sha256>;

/// Per-request authentication block, serialized under the `auth` key of the
/// outbound envelope with the vendor's exact field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthBlock {
    /// Vendor-assigned company identifier.
    #[serde(rename = "companyid")]
    pub company_id: i64,
    /// Millisecond Unix timestamp (second resolution, see [`Clock`]).
    pub timestamp: i64,
    /// Name of the API method being invoked.
    #[serde(rename = "APIMethod")]
    pub api_method: String,
    /// Lowercase hex HMAC-SHA256 digest of the canonical string.
    pub hash_hmac: String,
}

impl AuthBlock {
    /// Build the auth block for one invocation of `api_method`.
    pub fn for_method(credentials: &Credentials, clock: &dyn Clock, api_method: &str) -> Self {
        let timestamp = clock.unix_millis();
        let hash_hmac = sign(
            credentials.company_id(),
            api_method,
            timestamp,
            credentials.shared_secret(),
        );

        Self {
            company_id: credentials.company_id(),
            timestamp,
            api_method: api_method.to_string(),
            hash_hmac,
        }
    }
}

/// Compute the lowercase hex HMAC-SHA256 digest for one request.
///
/// Deterministic: the same company id, method name, timestamp and secret
/// always produce the same digest.
pub fn sign(company_id: i64, api_method: &str, timestamp_millis: i64, secret: &str) -> String {
    let canonical = canonical_string(company_id, api_method, timestamp_millis);
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take any size");
    mac.update(canonical.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// The string that gets signed: `{companyid}!{method}!{timestamp}`.
fn canonical_string(company_id: i64, api_method: &str, timestamp_millis: i64) -> String {
    format!("{}!{}!{}", company_id, api_method, timestamp_millis)
}
