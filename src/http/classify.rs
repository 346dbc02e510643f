//! Response classification.
//!
//! The vendor conflates HTTP transport status with business-logic status: an
//! HTTP 200 can carry a business failure in the envelope. Classification
//! therefore runs in two stages, HTTP layer first, then envelope layer, and
//! the check order matches the vendor's observed behaviour exactly:
//!
//! 1. transport failure -> `RequestFailed` (code 0)
//! 2. empty body -> `UnexpectedPayload` (even on a 404)
//! 3. HTTP 404 -> `RequestFailed` (code 404)
//! 4. undecodable or non-object body -> `RequestFailed` (code 0)
//! 5. envelope without `Code == 200 && Result == "Success"` ->
//!    `RequestFailed` with the vendor's code and message
//! 6. otherwise the parsed map is handed back for field extraction

use serde_json::{Map, Value};
use tracing::debug;

use super::envelope::{self, DecodeError};
use super::request::OutboundRequest;
use super::transport::{TransportError, TransportResponse};
use crate::error::{DarwinError, DarwinResult};

/// Validate a transport outcome, returning the response and its parsed
/// top-level map on success.
pub fn classify(
    request: &OutboundRequest,
    outcome: Result<TransportResponse, TransportError>,
) -> DarwinResult<(TransportResponse, Map<String, Value>)> {
    let response = outcome.map_err(|e| DarwinError::io_error(request, e))?;

    if response.body.is_empty() {
        return Err(DarwinError::unexpected_payload(
            request,
            response,
            "The response body was empty",
        ));
    }

    if response.status == 404 {
        return Err(DarwinError::route_not_found(request, response));
    }

    let payload = match envelope::decode(&response.body) {
        Ok(payload) => payload,
        // EmptyBody is unreachable here, already handled above
        Err(DecodeError::EmptyBody) | Err(DecodeError::InvalidJson) => {
            return Err(DarwinError::invalid_body(request, response));
        }
    };

    let code = envelope::coerce_i64(payload.get("Code")).unwrap_or(0);
    let result = payload.get("Result").and_then(Value::as_str);

    if code != 200 || result != Some("Success") {
        let message = payload.get("Msg").and_then(Value::as_str).unwrap_or("");
        debug!(code, message, url = %request.url, "vendor reported an error result");
        return Err(DarwinError::error_result(request, response, message, code));
    }

    Ok((response, payload))
}
