//! Public operation façade over the vendor API.
//!
//! Each operation is one request, one outcome: build the signed request,
//! send it through the transport, classify the response, then validate and
//! hydrate the operation-specific fields. No retries and no intermediate
//! state.
//!
//! # Concurrency
//!
//! Operations take `&self` and the client holds no cross-call mutable state
//! except the last-exchange diagnostic slot, which is overwritten on every
//! call. Callers issuing concurrent operations on one instance get correct
//! results but an arbitrary interleaving in [`DarwinClient::last_exchange`];
//! keep one call in flight per instance if the diagnostics matter.

use parking_lot::Mutex;
use serde_json::{Map, Value};
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::config::Credentials;
use crate::error::{DarwinError, DarwinResult};
use crate::http::envelope::{coerce_i64, json_type_name};
use crate::http::request::{OutboundRequest, RequestBuilder};
use crate::http::transport::{Transport, TransportResponse};
use crate::http::{classify, TransportError};
use crate::models::{ClientRecord, CountryRecord, MarketingSourceRecord};

/// Opaque business payload, passed through to the vendor without field
/// validation. The vendor silently ignores unknown keys.
pub type Payload = Map<String, Value>;

/// The last request/response pair seen by a client instance, retained
/// verbatim for diagnostics.
#[derive(Debug, Clone)]
pub struct ExchangeTrace {
    /// The request as it went out, including the signed envelope body.
    pub request: OutboundRequest,
    /// The raw response, absent when the transport itself failed.
    pub response: Option<TransportResponse>,
}

/// Typed client for the Darwin travel-CRM API.
///
/// Holds one immutable credential set; construct one instance per company
/// account. All operations return [`DarwinError`] on failure, with the
/// single exception of the 404 downgrade in
/// [`find_client_by_email_address`](Self::find_client_by_email_address).
pub struct DarwinClient {
    credentials: Credentials,
    clock: Box<dyn Clock>,
    transport: Box<dyn Transport>,
    last_exchange: Mutex<Option<ExchangeTrace>>,
}

/// One classified exchange: the request, the raw response, and the parsed
/// envelope map, kept together so shape errors can carry both sides.
struct Exchange {
    request: OutboundRequest,
    response: TransportResponse,
    payload: Map<String, Value>,
}

impl Exchange {
    fn unexpected(&self, message: impl Into<String>) -> DarwinError {
        DarwinError::unexpected_payload(&self.request, self.response.clone(), message)
    }
}

impl DarwinClient {
    /// Create a client using the wall clock for signing timestamps.
    pub fn new(credentials: Credentials, transport: Box<dyn Transport>) -> Self {
        Self::with_clock(credentials, transport, Box::new(SystemClock))
    }

    /// Create a client with an explicit clock, for deterministic signing in
    /// tests.
    pub fn with_clock(
        credentials: Credentials,
        transport: Box<dyn Transport>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            credentials,
            clock,
            transport,
            last_exchange: Mutex::new(None),
        }
    }

    /// List the countries known to the vendor.
    ///
    /// Entries with an empty name are dropped; the vendor is known to
    /// contain blank-named countries. Any non-object list element aborts
    /// the whole call, there is no best-effort partial list.
    pub async fn list_countries(&self) -> DarwinResult<Vec<CountryRecord>> {
        let exchange = self
            .call("getCountryList", Some("search"), Some(Payload::new()))
            .await?;

        let list = match exchange.payload.get("CountryList") {
            Some(Value::Array(list)) => list,
            _ => return Err(exchange.unexpected("The country list is not an array")),
        };

        let mut countries = Vec::with_capacity(list.len());
        for item in list {
            let Some(item) = item.as_object() else {
                return Err(
                    exchange.unexpected("The list of countries contained a non-object member")
                );
            };

            if let Some(country) =
                CountryRecord::from_vendor(item).map_err(|msg| exchange.unexpected(msg))?
            {
                countries.push(country);
            }
        }

        Ok(countries)
    }

    /// Retrieve client information by exact email match.
    ///
    /// Returns `Ok(None)` when the vendor answers 404; this is the one place
    /// a transport-layer error is deliberately downgraded to an absence
    /// signal.
    ///
    /// When several clients share the email address the vendor returns the
    /// most recently inserted one; older duplicates are unreachable through
    /// this call. That is observed vendor behaviour, not a guarantee.
    pub async fn find_client_by_email_address(
        &self,
        email_address: &str,
    ) -> DarwinResult<Option<ClientRecord>> {
        let mut search = Payload::new();
        search.insert("email".to_string(), Value::String(email_address.to_string()));

        let exchange = match self.call("getClient", Some("search"), Some(search)).await {
            Ok(exchange) => exchange,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e),
        };

        let client = match exchange.payload.get("Client") {
            Some(Value::Object(client)) => client,
            other => {
                return Err(exchange.unexpected(format!(
                    "Expected an object representing the client information but received {}",
                    json_type_name(other)
                )))
            }
        };

        ClientRecord::from_vendor(client)
            .map(Some)
            .map_err(|msg| exchange.unexpected(msg))
    }

    /// Create or overwrite the client matching `email_address` and return
    /// its identifier.
    ///
    /// The email address is the idempotency key. The vendor writes every
    /// field omitted from `client_data` as NULL on the remote side: a
    /// partial payload after a prior full one silently erases the fields it
    /// leaves out. This destructive partial-update behaviour is the vendor's
    /// contract and is passed through deliberately.
    pub async fn create_or_update_client_with_email_address(
        &self,
        email_address: &str,
        mut client_data: Payload,
    ) -> DarwinResult<i64> {
        client_data.insert("email".to_string(), Value::String(email_address.to_string()));

        let exchange = self
            .call("createClient", Some("client"), Some(client_data))
            .await?;

        coerce_i64(exchange.payload.get("clientid")).ok_or_else(|| {
            exchange.unexpected(
                "The `createClient` response payload should contain a client identifier \
                 in the field `clientid` but none was found",
            )
        })
    }

    /// Create a trip enquiry for an existing client and return the trip
    /// identifier.
    ///
    /// The payload is an arbitrary map of enquiry/pax/emergency-contact/
    /// insurance sub-records; the vendor accepts and ignores unknown keys,
    /// so only the response shape is validated here.
    pub async fn create_enquiry(&self, client_id: i64, mut payload: Payload) -> DarwinResult<i64> {
        payload.insert("clientid".to_string(), Value::from(client_id));

        let exchange = self
            .call("createTripEnquiry", Some("tripenquiry"), Some(payload))
            .await?;

        coerce_i64(exchange.payload.get("tripid")).ok_or_else(|| {
            exchange.unexpected(
                "The `createEnquiry` response payload should contain a trip identifier \
                 in the field `tripid` but none was found",
            )
        })
    }

    /// List the vendor's marketing source codes.
    pub async fn get_marketing_source_codes(&self) -> DarwinResult<Vec<MarketingSourceRecord>> {
        let exchange = self
            .call("getMarketingSourceCodes", Some("search"), Some(Payload::new()))
            .await?;

        let list = match exchange.payload.get("MarketingSourceList") {
            Some(Value::Array(list)) => list,
            _ => return Err(exchange.unexpected("The marketing source list is not an array")),
        };

        let mut sources = Vec::with_capacity(list.len());
        for item in list {
            let Some(item) = item.as_object() else {
                return Err(exchange
                    .unexpected("The list of marketing sources contained a non-object member"));
            };

            sources.push(
                MarketingSourceRecord::from_vendor(item)
                    .map_err(|msg| exchange.unexpected(msg))?,
            );
        }

        Ok(sources)
    }

    /// The last request/response pair, overwritten on every call.
    ///
    /// Callers needing history must capture it synchronously after each call
    /// returns.
    pub fn last_exchange(&self) -> Option<ExchangeTrace> {
        self.last_exchange.lock().clone()
    }

    /// Build, send and classify one vendor API call.
    async fn call(
        &self,
        api_method: &str,
        payload_key: Option<&str>,
        payload: Option<Payload>,
    ) -> DarwinResult<Exchange> {
        let request = RequestBuilder::new(&self.credentials, self.clock.as_ref()).build(
            "POST",
            api_method,
            payload_key,
            payload.as_ref(),
        );

        debug!(method = api_method, url = %request.url, "POST");

        let outcome: Result<TransportResponse, TransportError> =
            self.transport.send(&request).await;

        *self.last_exchange.lock() = Some(ExchangeTrace {
            request: request.clone(),
            response: outcome.as_ref().ok().cloned(),
        });

        let (response, payload) = classify(&request, outcome)?;

        Ok(Exchange {
            request,
            response,
            payload,
        })
    }
}
