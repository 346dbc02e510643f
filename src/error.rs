//! Error taxonomy for vendor API calls.
//!
//! Two top-level kinds, both carrying the originating request and (when one
//! was received) the raw response for diagnostics:
//!
//! - [`DarwinError::RequestFailed`]: the exchange itself failed - an I/O
//!   error, a 404, an undecodable body, or a vendor-reported business error.
//! - [`DarwinError::UnexpectedPayload`]: the vendor reported success but the
//!   payload shape did not match what the calling operation requires.
//!
//! Callers are expected to distinguish "remote said no" from "we couldn't
//! understand what remote said".

use thiserror::Error;

use crate::http::request::OutboundRequest;
use crate::http::transport::TransportResponse;

/// Result type for vendor API operations.
pub type DarwinResult<T> = Result<T, DarwinError>;

/// Errors raised by vendor API operations.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum DarwinError {
    /// Transport-level or HTTP-level failure, including vendor-reported
    /// business errors.
    ///
    /// `code` is 0 for I/O and undecodable-body failures, 404 for
    /// route-not-found, and the vendor's own code for envelope errors.
    #[error("{message}")]
    RequestFailed {
        /// The request that was being executed.
        request: Box<OutboundRequest>,
        /// The response, when one was received at all.
        response: Option<TransportResponse>,
        /// Human-readable failure description.
        message: String,
        /// Numeric failure code (0, 404, or the vendor's code).
        code: i64,
    },

    /// The HTTP exchange succeeded and the vendor reported success, but the
    /// payload shape did not match what the operation requires.
    #[error("{message}")]
    UnexpectedPayload {
        /// The request that was being executed.
        request: Box<OutboundRequest>,
        /// The response whose payload was rejected.
        response: TransportResponse,
        /// Description naming the missing or malformed field.
        message: String,
    },
}

impl DarwinError {
    /// The request failed before a response could be read.
    pub fn io_error(request: &OutboundRequest, cause: impl std::fmt::Display) -> Self {
        Self::RequestFailed {
            request: Box::new(request.clone()),
            response: None,
            message: format!(
                "The request to \"{}\" failed because of an i/o error: {}",
                request.url, cause
            ),
            code: 0,
        }
    }

    /// The route returned a 404, which for lookups may mean "not found".
    pub fn route_not_found(request: &OutboundRequest, response: TransportResponse) -> Self {
        Self::RequestFailed {
            request: Box::new(request.clone()),
            response: Some(response),
            message: format!("The request to \"{}\" resulted in a 404 error", request.url),
            code: 404,
        }
    }

    /// The response body was not decodable JSON (or not a JSON object).
    ///
    /// Classified as a request failure rather than a payload-shape failure:
    /// it indicates a transport or vendor-server malfunction, not a
    /// semantically wrong but well-formed response.
    pub fn invalid_body(request: &OutboundRequest, response: TransportResponse) -> Self {
        Self::RequestFailed {
            request: Box::new(request.clone()),
            response: Some(response),
            message: format!(
                "The response received from {} {} returned an invalid response body \
                 that could not be decoded",
                request.method, request.url
            ),
            code: 0,
        }
    }

    /// The vendor envelope reported a business error.
    pub fn error_result(
        request: &OutboundRequest,
        response: TransportResponse,
        vendor_message: &str,
        code: i64,
    ) -> Self {
        Self::RequestFailed {
            request: Box::new(request.clone()),
            response: Some(response),
            message: format!(
                "The request to \"{}\" failed with message \"{}\"",
                request.url, vendor_message
            ),
            code,
        }
    }

    /// The vendor reported success but the payload shape is wrong.
    pub fn unexpected_payload(
        request: &OutboundRequest,
        response: TransportResponse,
        message: impl Into<String>,
    ) -> Self {
        Self::UnexpectedPayload {
            request: Box::new(request.clone()),
            response,
            message: message.into(),
        }
    }

    /// Numeric failure code. Payload-shape errors carry no vendor code and
    /// report 0.
    pub fn code(&self) -> i64 {
        match self {
            Self::RequestFailed { code, .. } => *code,
            Self::UnexpectedPayload { .. } => 0,
        }
    }

    /// The request that produced this error.
    pub fn request(&self) -> &OutboundRequest {
        match self {
            Self::RequestFailed { request, .. } => request,
            Self::UnexpectedPayload { request, .. } => request,
        }
    }

    /// The response, when one was received.
    pub fn response(&self) -> Option<&TransportResponse> {
        match self {
            Self::RequestFailed { response, .. } => response.as_ref(),
            Self::UnexpectedPayload { response, .. } => Some(response),
        }
    }

    /// Returns true for the 404 route-not-found classification.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RequestFailed { code: 404, .. })
    }
}

/// Classification of error types for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// May resolve on retry (network issues, garbled responses)
    Transient,
    /// Won't resolve on retry (vendor rejections, shape mismatches)
    Permanent,
}

/// Trait for errors that can classify themselves.
///
/// This crate ships no retry loop (resilience belongs to the transport), but
/// errors self-describe so callers can build one.
pub trait ErrorClassification {
    /// Returns the category of this error
    fn category(&self) -> ErrorCategory;

    /// Returns true if this error may succeed on retry
    fn is_transient(&self) -> bool {
        self.category() == ErrorCategory::Transient
    }

    /// Returns true if this error won't succeed on retry
    fn is_permanent(&self) -> bool {
        self.category() == ErrorCategory::Permanent
    }
}

impl ErrorClassification for DarwinError {
    fn category(&self) -> ErrorCategory {
        match self {
            // Code 0 covers I/O failures and garbled bodies; both point at a
            // transport or vendor-server malfunction that may clear up.
            DarwinError::RequestFailed { code: 0, .. } => ErrorCategory::Transient,
            DarwinError::RequestFailed { .. } => ErrorCategory::Permanent,
            DarwinError::UnexpectedPayload { .. } => ErrorCategory::Permanent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> OutboundRequest {
        OutboundRequest {
            method: "POST".to_string(),
            url: "https://example.com/api/getClient.php".to_string(),
            content_type: "application/json; charset=utf-8",
            body: "{}".to_string(),
        }
    }

    fn response(status: u16, body: &str) -> TransportResponse {
        TransportResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_io_error_is_transient_with_code_zero() {
        let err = DarwinError::io_error(&request(), "connection refused");
        assert_eq!(err.code(), 0);
        assert!(err.is_transient());
        assert!(err.response().is_none());
        assert!(err.to_string().contains("i/o error"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_route_not_found() {
        let err = DarwinError::route_not_found(&request(), response(404, "gone"));
        assert_eq!(err.code(), 404);
        assert!(err.is_not_found());
        assert!(err.is_permanent());
        assert!(err.to_string().contains("resulted in a 404 error"));
    }

    #[test]
    fn test_vendor_error_carries_code_and_message() {
        let err = DarwinError::error_result(&request(), response(200, "{}"), "boom", 500);
        assert_eq!(err.code(), 500);
        assert!(err.to_string().contains("boom"));
        assert!(err.is_permanent());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_unexpected_payload_always_has_response() {
        let err = DarwinError::unexpected_payload(
            &request(),
            response(200, "{}"),
            "The country list is not an array",
        );
        assert_eq!(err.code(), 0);
        assert!(err.response().is_some());
        assert!(err.is_permanent());
    }

    #[test]
    fn test_invalid_body_is_transient() {
        let err = DarwinError::invalid_body(&request(), response(200, "<html>"));
        assert_eq!(err.code(), 0);
        assert!(err.is_transient());
        assert!(err.to_string().contains("could not be decoded"));
    }
}
