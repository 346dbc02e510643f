//! Client configuration.
//!
//! One [`Credentials`] value per vendor account; the client takes it by value
//! at construction and never mutates it. The shared secret is redacted from
//! `Debug` output and never logged.

use std::env;
use std::fmt;

/// Connection and signing credentials for one Darwin company account.
#[derive(Clone)]
pub struct Credentials {
    server_url: String,
    base_path: String,
    shared_secret: String,
    company_id: i64,
}

impl Credentials {
    /// Create a new credentials value.
    ///
    /// # Arguments
    ///
    /// * `server_url` - Server base URL, e.g. "https://crm.example.com"
    /// * `base_path` - API base path segment, e.g. "api" (slashes are trimmed)
    /// * `shared_secret` - HMAC shared secret
    /// * `company_id` - Vendor-assigned company identifier (positive)
    pub fn new(
        server_url: impl Into<String>,
        base_path: impl Into<String>,
        shared_secret: impl Into<String>,
        company_id: i64,
    ) -> Self {
        Self {
            server_url: server_url.into(),
            base_path: base_path.into(),
            shared_secret: shared_secret.into(),
            company_id,
        }
    }

    /// Create credentials from environment variables.
    ///
    /// Reads `DARWIN_API_URL`, `DARWIN_BASE_PATH`, `DARWIN_SHARED_SECRET`
    /// and `DARWIN_COMPANY_ID`. Returns `None` if any variable is missing
    /// or the company id does not parse.
    pub fn from_env() -> Option<Self> {
        let server_url = env::var("DARWIN_API_URL").ok()?;
        let base_path = env::var("DARWIN_BASE_PATH").ok()?;
        let shared_secret = env::var("DARWIN_SHARED_SECRET").ok()?;
        let company_id = env::var("DARWIN_COMPANY_ID").ok()?.parse().ok()?;
        Some(Self::new(server_url, base_path, shared_secret, company_id))
    }

    /// Server base URL.
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// API base path segment.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Company identifier.
    pub fn company_id(&self) -> i64 {
        self.company_id
    }

    pub(crate) fn shared_secret(&self) -> &str {
        &self.shared_secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("server_url", &self.server_url)
            .field("base_path", &self.base_path)
            .field("shared_secret", &"<redacted>")
            .field("company_id", &self.company_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let credentials = Credentials::new("https://example.com", "api", "hunter2", 99);
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_accessors() {
        let credentials = Credentials::new("https://example.com", "/api/", "s", 42);
        assert_eq!(credentials.server_url(), "https://example.com");
        assert_eq!(credentials.base_path(), "/api/");
        assert_eq!(credentials.company_id(), 42);
        assert_eq!(credentials.shared_secret(), "s");
    }
}
