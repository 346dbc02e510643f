//! Outbound request assembly.
//!
//! URL shape: `{serverUrl}/{basePath}/{method}.php` with slashes normalized.
//! All data travels in the JSON body regardless of HTTP verb; the vendor API
//! exclusively uses POST in practice and no query parameters exist.

use serde_json::{Map, Value};

use super::auth::AuthBlock;
use super::envelope;
use crate::clock::Clock;
use crate::config::Credentials;

/// Content type sent with every request.
pub const CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// A fully formed outbound request, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    /// HTTP verb ("POST" for every vendor operation).
    pub method: String,
    /// Full endpoint URL.
    pub url: String,
    /// Content type header value.
    pub content_type: &'static str,
    /// Serialized envelope body.
    pub body: String,
}

/// Builds outbound requests from an operation name and optional payload,
/// using the signer and the envelope codec.
pub struct RequestBuilder<'a> {
    credentials: &'a Credentials,
    clock: &'a dyn Clock,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(credentials: &'a Credentials, clock: &'a dyn Clock) -> Self {
        Self { credentials, clock }
    }

    /// Produce a fully formed request for one vendor operation.
    ///
    /// # Arguments
    ///
    /// * `http_method` - HTTP verb
    /// * `api_method` - Vendor method name, becomes `{api_method}.php`
    /// * `payload_key` - Operation-specific envelope key, if the operation
    ///   carries a body payload
    /// * `payload` - The payload map, passed through opaquely
    pub fn build(
        &self,
        http_method: &str,
        api_method: &str,
        payload_key: Option<&str>,
        payload: Option<&Map<String, Value>>,
    ) -> OutboundRequest {
        let auth = AuthBlock::for_method(self.credentials, self.clock, api_method);

        OutboundRequest {
            method: http_method.to_string(),
            url: self.endpoint_url(api_method),
            content_type: CONTENT_TYPE,
            body: envelope::encode(&auth, payload_key, payload),
        }
    }

    fn endpoint_url(&self, api_method: &str) -> String {
        format!(
            "{}/{}/{}.php",
            self.credentials.server_url().trim_end_matches('/'),
            self.credentials.base_path().trim_matches('/'),
            api_method,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct FixedClock(i64);

    impl Clock for FixedClock {
        fn unix_seconds(&self) -> i64 {
            self.0
        }
    }

    fn build(server_url: &str, base_path: &str) -> OutboundRequest {
        let credentials = Credentials::new(server_url, base_path, "secret", 99);
        let clock = FixedClock(1_700_000_000);
        RequestBuilder::new(&credentials, &clock).build("POST", "getCountryList", None, None)
    }

    #[test]
    fn test_url_is_slash_normalized() {
        let expected = "https://example.com/api/getCountryList.php";
        assert_eq!(build("https://example.com", "api").url, expected);
        assert_eq!(build("https://example.com/", "/api/").url, expected);
        assert_eq!(build("https://example.com/", "api").url, expected);
    }

    #[test]
    fn test_request_shape() {
        let request = build("https://example.com", "api");
        assert_eq!(request.method, "POST");
        assert_eq!(request.content_type, "application/json; charset=utf-8");

        let body: Value = serde_json::from_str(&request.body).unwrap();
        assert_eq!(body["auth"]["companyid"], 99);
        assert_eq!(body["auth"]["APIMethod"], "getCountryList");
    }

    #[test]
    fn test_payload_travels_under_its_key() {
        let credentials = Credentials::new("https://example.com", "api", "secret", 99);
        let clock = FixedClock(1_700_000_000);
        let mut payload = Map::new();
        payload.insert("email".to_string(), json!("me@example.com"));

        let request = RequestBuilder::new(&credentials, &clock).build(
            "POST",
            "getClient",
            Some("search"),
            Some(&payload),
        );

        let body: Value = serde_json::from_str(&request.body).unwrap();
        assert_eq!(body["search"]["email"], "me@example.com");
        assert_eq!(request.url, "https://example.com/api/getClient.php");
    }
}
