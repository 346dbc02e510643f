//! Darwin sandbox integration tests.
//!
//! These tests exercise the client against a real vendor environment and
//! re-verify externally observed behaviour that must not be assumed stable:
//! the vendor silently ignoring unknown payload keys, and duplicate email
//! addresses resolving to the most recently inserted client.
//!
//! # Setup
//!
//! 1. Set environment variables for a sandbox company account:
//!    ```bash
//!    export DARWIN_API_URL=https://sandbox.example.com
//!    export DARWIN_BASE_PATH=api
//!    export DARWIN_SHARED_SECRET=...
//!    export DARWIN_COMPANY_ID=...
//!    ```
//!
//! 2. Run:
//!    ```bash
//!    cargo test --test darwin_integration -- --ignored --nocapture
//!    ```
//!
//! Tests are `#[ignore]` by default: they need credentials and they write
//! real client records. Remember that the upsert is destructive; only ever
//! point these at a sandbox company.

use serde_json::json;

use darwin_client::{Credentials, DarwinClient, ReqwestTransport};

fn sandbox_client() -> Option<DarwinClient> {
    let credentials = Credentials::from_env()?;
    Some(DarwinClient::new(
        credentials,
        Box::new(ReqwestTransport::new()),
    ))
}

/// Skip the test when no sandbox credentials are configured.
macro_rules! require_sandbox {
    () => {
        match sandbox_client() {
            Some(client) => client,
            None => {
                eprintln!("Skipping: DARWIN_* environment variables not set");
                return;
            }
        }
    };
}

fn unique_email(tag: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}-{}@integration.invalid", tag, nanos)
}

#[tokio::test]
#[ignore]
async fn create_find_roundtrip() {
    let client = require_sandbox!();
    let email = unique_email("roundtrip");

    let mut payload = serde_json::Map::new();
    payload.insert("firstname".to_string(), json!("Fred"));
    payload.insert("lastname".to_string(), json!("Jones"));

    let id = client
        .create_or_update_client_with_email_address(&email, payload)
        .await
        .expect("upsert failed");
    assert!(id > 0);

    let found = client
        .find_client_by_email_address(&email)
        .await
        .expect("lookup failed")
        .expect("client just created was not found");
    assert_eq!(found.id, id);
    assert_eq!(found.first_name, "Fred");
    assert_eq!(found.last_name, "Jones");
}

#[tokio::test]
#[ignore]
async fn unknown_payload_keys_are_silently_ignored() {
    // Observed vendor behaviour; if this test starts failing the vendor has
    // tightened their payload validation and the pass-through contract in
    // the crate docs needs revisiting.
    let client = require_sandbox!();
    let email = unique_email("unknown-keys");

    let mut payload = serde_json::Map::new();
    payload.insert("firstname".to_string(), json!("Fred"));
    payload.insert("definitelynotarealfield".to_string(), json!("ignored"));

    let id = client
        .create_or_update_client_with_email_address(&email, payload)
        .await
        .expect("vendor rejected a payload with unknown keys");
    assert!(id > 0);
}

#[tokio::test]
#[ignore]
async fn duplicate_email_resolves_to_the_most_recent_client() {
    // Externally observed "most recently inserted wins" ordering; the upsert
    // keys on email so producing true duplicates needs two distinct inserts
    // through the vendor UI or a second account. This test only asserts the
    // weaker property it can set up on its own: the id returned by a fresh
    // upsert is the id the search resolves to.
    let client = require_sandbox!();
    let email = unique_email("duplicates");

    let first = client
        .create_or_update_client_with_email_address(&email, serde_json::Map::new())
        .await
        .expect("first upsert failed");
    let second = client
        .create_or_update_client_with_email_address(&email, serde_json::Map::new())
        .await
        .expect("second upsert failed");
    assert_eq!(first, second);

    let found = client
        .find_client_by_email_address(&email)
        .await
        .expect("lookup failed")
        .expect("client not found");
    assert_eq!(found.id, second);
}

#[tokio::test]
#[ignore]
async fn country_list_is_non_empty_and_blank_free() {
    let client = require_sandbox!();

    let countries = client.list_countries().await.expect("listCountries failed");
    assert!(!countries.is_empty());
    for country in &countries {
        assert!(country.id > 0);
        assert!(!country.name.is_empty());
    }
}

#[tokio::test]
#[ignore]
async fn enquiry_creation_returns_a_trip_id() {
    let client = require_sandbox!();
    let email = unique_email("enquiry");

    let client_id = client
        .create_or_update_client_with_email_address(&email, serde_json::Map::new())
        .await
        .expect("upsert failed");

    let mut enquiry = serde_json::Map::new();
    enquiry.insert("description".to_string(), json!("Integration enquiry"));
    enquiry.insert("adults".to_string(), json!(2));

    let trip_id = client
        .create_enquiry(client_id, enquiry)
        .await
        .expect("createEnquiry failed");
    assert!(trip_id > 0);
}
