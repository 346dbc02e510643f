//! Vendor envelope codec.
//!
//! Outbound: `{ "auth": AuthBlock, [payloadKey]: payload }`, the payload key
//! omitted entirely when there is no body payload for the operation.
//!
//! Inbound: the body is parsed to a JSON object and returned unchanged; the
//! codec does not know operation-specific keys (`CountryList`, `Client`,
//! `clientid`, ...), downstream components extract what they need.

use serde_json::{Map, Value};

use super::auth::AuthBlock;

/// Why an inbound body could not be decoded. Consumed by the classifier,
/// which maps the two cases to distinct error classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The body was empty.
    EmptyBody,
    /// The body was not valid JSON, or not a JSON object.
    InvalidJson,
}

/// Serialize the outbound envelope to a JSON string.
///
/// The payload key/value pair is included only when both are present; it is
/// omitted rather than set to null.
pub fn encode(
    auth: &AuthBlock,
    payload_key: Option<&str>,
    payload: Option<&Map<String, Value>>,
) -> String {
    let mut envelope = Map::new();
    envelope.insert(
        "auth".to_string(),
        serde_json::to_value(auth).expect("auth block serialization cannot fail"),
    );

    if let (Some(key), Some(payload)) = (payload_key, payload) {
        envelope.insert(key.to_string(), Value::Object(payload.clone()));
    }

    serde_json::to_string(&Value::Object(envelope))
        .expect("JSON object serialization cannot fail")
}

/// Parse an inbound body into the top-level JSON object.
pub fn decode(body: &str) -> Result<Map<String, Value>, DecodeError> {
    if body.is_empty() {
        return Err(DecodeError::EmptyBody);
    }

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(DecodeError::InvalidJson),
    }
}

/// Coerce a vendor value to an integer.
///
/// The vendor is loose about number typing: identifiers and codes arrive as
/// JSON numbers or as numeric strings, sometimes interchangeably between
/// environments. Both are accepted wherever the original API accepted them.
pub(crate) fn coerce_i64(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Coerce a vendor flag to a bool. The vendor uses 1/0, occasionally as
/// strings or booleans.
pub(crate) fn coerce_bool(value: Option<&Value>) -> Option<bool> {
    match value? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        Value::String(s) => match s.trim() {
            "1" => Some(true),
            "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Human-readable name of a JSON value's type, for shape-error messages.
pub(crate) fn json_type_name(value: Option<&Value>) -> &'static str {
    match value {
        None => "nothing",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "a boolean",
        Some(Value::Number(_)) => "a number",
        Some(Value::String(_)) => "a string",
        Some(Value::Array(_)) => "an array",
        Some(Value::Object(_)) => "an object",
    }
}
