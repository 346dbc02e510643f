//! Typed client for the Darwin travel-CRM HTTP/JSON API.
//!
//! The vendor API is a set of PHP endpoints that exclusively speak JSON over
//! POST. Every request carries an HMAC-SHA256 authentication block, and every
//! response wraps its result in a `{Result, Code, Msg, ...}` envelope whose
//! success/failure reporting is independent of the HTTP status code: an HTTP
//! 200 can carry a business failure, and the classifier checks both layers.
//!
//! # Example
//!
//! ```ignore
//! use darwin_client::{Credentials, DarwinClient, ReqwestTransport};
//!
//! let credentials = Credentials::new(
//!     "https://crm.example.com",
//!     "api/v1",
//!     shared_secret,
//!     1234,
//! );
//! let client = DarwinClient::new(credentials, Box::new(ReqwestTransport::new()));
//!
//! let countries = client.list_countries().await?;
//! let found = client.find_client_by_email_address("me@example.com").await?;
//! ```
//!
//! # Vendor quirks preserved on purpose
//!
//! - The upsert operation writes every omitted field as NULL on the remote
//!   side. A partial update after a full one erases data. See
//!   [`DarwinClient::create_or_update_client_with_email_address`].
//! - Searching by email returns the most recently inserted client when
//!   duplicates exist; older duplicates are unreachable through this API.
//! - Unknown payload keys are silently ignored by the vendor, so business
//!   payloads are passed through as opaque maps without field validation.

pub mod clock;
pub mod config;
pub mod error;
pub mod http;
pub mod models;

mod client;

pub use client::{DarwinClient, ExchangeTrace, Payload};
pub use clock::{Clock, SystemClock};
pub use config::Credentials;
pub use error::{DarwinError, DarwinResult, ErrorCategory, ErrorClassification};
pub use http::auth::AuthBlock;
pub use http::request::OutboundRequest;
pub use http::transport::{ReqwestTransport, Transport, TransportError, TransportResponse};
pub use models::{ClientRecord, CountryRecord, MarketingSourceRecord};
