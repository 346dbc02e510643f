//! Read models hydrated from vendor responses.
//!
//! All records are plain values constructed once per response; no mutation,
//! no identity beyond field equality. Hydration is strict: it reads exactly
//! the fields the vendor sent and fails with a field-naming message rather
//! than inferring anything that is absent.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::http::envelope::{coerce_bool, coerce_i64};

/// A client record as returned by the `getClient` search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientRecord {
    /// Vendor-assigned client identifier.
    pub id: i64,
    /// Email address the client was found under.
    pub email_address: String,
    pub first_name: String,
    pub last_name: String,
}

/// A country as returned by `getCountryList`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryRecord {
    pub id: i64,
    /// Never empty: blank-named entries are dropped during hydration.
    pub name: String,
}

/// A marketing source code as returned by `getMarketingSourceCodes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketingSourceRecord {
    pub source_id: i64,
    pub name: String,
    pub category_id: i64,
    pub category_name: String,
    pub is_active: bool,
    pub is_public: bool,
}

impl ClientRecord {
    /// Hydrate from the vendor's `Client` object.
    ///
    /// `clientid` must be numeric. `email` may be absent or null but not
    /// empty; `firstname`/`lastname` may be absent, null or strings. Absent
    /// optionals hydrate to empty strings, matching the vendor's own
    /// treatment of unset columns.
    pub(crate) fn from_vendor(data: &Map<String, Value>) -> Result<Self, String> {
        let id = coerce_i64(data.get("clientid")).ok_or_else(|| {
            "The client information did not contain a numeric `clientid` field".to_string()
        })?;

        let email_address = match data.get("email") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            other => {
                return Err(format!(
                    "The client information contained an invalid `email` field: {:?}",
                    other
                ))
            }
        };

        Ok(Self {
            id,
            email_address,
            first_name: optional_string(data, "firstname")?,
            last_name: optional_string(data, "lastname")?,
        })
    }
}

impl CountryRecord {
    /// Hydrate from one `CountryList` element.
    ///
    /// Returns `Ok(None)` for entries with an empty `countryname`; the
    /// vendor is known to contain blank-named countries that are not
    /// meaningful to callers, and they are silently dropped.
    pub(crate) fn from_vendor(data: &Map<String, Value>) -> Result<Option<Self>, String> {
        let id = coerce_i64(data.get("id"))
            .filter(|id| *id > 0)
            .ok_or_else(|| {
                "A country list entry did not contain a positive integer `id` field".to_string()
            })?;

        let name = match data.get("countryname") {
            Some(Value::String(s)) => s.clone(),
            other => {
                return Err(format!(
                    "A country list entry did not contain a string `countryname` field, got {:?}",
                    other
                ))
            }
        };

        if name.is_empty() {
            return Ok(None);
        }

        Ok(Some(Self { id, name }))
    }
}

impl MarketingSourceRecord {
    /// Hydrate from one `MarketingSourceList` element.
    pub(crate) fn from_vendor(data: &Map<String, Value>) -> Result<Self, String> {
        Ok(Self {
            source_id: required_i64(data, "sourceid")?,
            name: required_string(data, "sourcename")?,
            category_id: required_i64(data, "categoryid")?,
            category_name: required_string(data, "categoryname")?,
            is_active: required_flag(data, "isactive")?,
            is_public: required_flag(data, "ispublic")?,
        })
    }
}

fn optional_string(data: &Map<String, Value>, field: &str) -> Result<String, String> {
    match data.get(field) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        other => Err(format!(
            "The client information contained an invalid `{}` field: {:?}",
            field, other
        )),
    }
}

fn required_i64(data: &Map<String, Value>, field: &str) -> Result<i64, String> {
    coerce_i64(data.get(field)).ok_or_else(|| {
        format!(
            "A marketing source entry did not contain a numeric `{}` field",
            field
        )
    })
}

fn required_string(data: &Map<String, Value>, field: &str) -> Result<String, String> {
    match data.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        _ => Err(format!(
            "A marketing source entry did not contain a string `{}` field",
            field
        )),
    }
}

fn required_flag(data: &Map<String, Value>, field: &str) -> Result<bool, String> {
    coerce_bool(data.get(field)).ok_or_else(|| {
        format!(
            "A marketing source entry did not contain a 1/0 flag in the `{}` field",
            field
        )
    })
}
