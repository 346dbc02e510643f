//! Request construction, authentication, and response-validation pipeline.
//!
//! Leaf-first: [`auth`] computes the per-request authentication block,
//! [`envelope`] wraps and unwraps the vendor's JSON envelope, [`request`]
//! assembles the outbound request, [`transport`] carries it, and
//! [`classify`] turns the transport outcome into a validated payload map or
//! a typed error.

pub mod auth;
pub mod classify;
pub mod envelope;
pub mod request;
pub mod transport;

pub use auth::AuthBlock;
pub use classify::classify;
pub use request::{OutboundRequest, RequestBuilder};
pub use transport::{ReqwestTransport, Transport, TransportError, TransportResponse};
