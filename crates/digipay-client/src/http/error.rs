/*
[INPUT]:  Error sources (configuration, transport, API status, body decoding)
[OUTPUT]: Structured error types with status codes and parsed bodies
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Main error type for the DigiPay client
#[derive(Error, Debug)]
pub enum DigipayError {
    /// Client could not be configured (missing key, bad base URL, bad header value)
    #[error("Configuration error: {0}")]
    Config(String),

    /// An authenticated call was attempted without a credential
    #[error("Authentication required: {message}")]
    Authentication { message: String },

    /// HTTP exchange could not complete (DNS, connect, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-2xx status
    #[error("API error (status {status}): {message}")]
    Api {
        status: u16,
        message: String,
        body: Value,
    },

    /// 2xx body was not the JSON we expected
    #[error("Invalid response body (status {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// Envelope decoded but carried no usable payload
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request body could not be serialized
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl DigipayError {
    /// Build an API error from a non-2xx status and the raw response body.
    ///
    /// The body is kept as parsed JSON when possible and as a JSON string
    /// otherwise. The message prefers the body's `message` field, then
    /// `error`, then the raw text, then the status reason phrase.
    pub fn from_response(status: StatusCode, raw: &[u8]) -> Self {
        let text = String::from_utf8_lossy(raw).into_owned();
        let body = serde_json::from_slice::<Value>(raw).unwrap_or_else(|_| Value::String(text.clone()));

        let message = ["message", "error"]
            .iter()
            .find_map(|field| body.get(field).and_then(Value::as_str))
            .map(str::to_string)
            .or_else(|| {
                let trimmed = text.trim();
                (!trimmed.is_empty() && !body.is_object()).then(|| trimmed.to_string())
            })
            .or_else(|| status.canonical_reason().map(str::to_string))
            .unwrap_or_else(|| "Unknown error".to_string());

        DigipayError::Api {
            status: status.as_u16(),
            message,
            body,
        }
    }

    /// Transport-class failure: the exchange or the body decoding broke down
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            DigipayError::Http(_) | DigipayError::Decode { .. } | DigipayError::InvalidResponse(_)
        )
    }

    /// Service rejected the request with a non-2xx status
    pub fn is_api_error(&self) -> bool {
        matches!(self, DigipayError::Api { .. })
    }

    /// Configuration-class failure raised before any request was built
    pub fn is_config_error(&self) -> bool {
        matches!(self, DigipayError::Config(_) | DigipayError::UrlParse(_))
    }

    /// Missing credential locally, or 401/403 from the service
    pub fn is_auth_error(&self) -> bool {
        match self {
            DigipayError::Authentication { .. } => true,
            DigipayError::Api { status, .. } => matches!(status, 401 | 403),
            _ => false,
        }
    }

    /// Check if the HTTP exchange timed out
    pub fn is_timeout(&self) -> bool {
        matches!(self, DigipayError::Http(err) if err.is_timeout())
    }

    /// HTTP status associated with the error, if a response was received
    pub fn status_code(&self) -> Option<u16> {
        match self {
            DigipayError::Api { status, .. } | DigipayError::Decode { status, .. } => Some(*status),
            DigipayError::Http(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// Service-provided message for API errors
    pub fn api_message(&self) -> Option<&str> {
        match self {
            DigipayError::Api { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Parsed (or raw) body of an API error response
    pub fn body(&self) -> Option<&Value> {
        match self {
            DigipayError::Api { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Result type alias for DigiPay operations
pub type Result<T> = std::result::Result<T, DigipayError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_error_uses_message_field() {
        let err = DigipayError::from_response(
            StatusCode::PAYMENT_REQUIRED,
            br#"{"success":false,"message":"insufficient funds"}"#,
        );

        assert!(err.is_api_error());
        assert!(!err.is_transport());
        assert_eq!(err.status_code(), Some(402));
        assert_eq!(err.api_message(), Some("insufficient funds"));
        assert_eq!(
            err.body(),
            Some(&json!({"success": false, "message": "insufficient funds"}))
        );
    }

    #[test]
    fn test_api_error_falls_back_to_error_field() {
        let err = DigipayError::from_response(StatusCode::BAD_REQUEST, br#"{"error":"bad phone"}"#);
        assert_eq!(err.api_message(), Some("bad phone"));
    }

    #[test]
    fn test_api_error_keeps_raw_body_when_not_json() {
        let err = DigipayError::from_response(StatusCode::BAD_GATEWAY, b"upstream down");

        assert_eq!(err.api_message(), Some("upstream down"));
        assert_eq!(err.body(), Some(&Value::String("upstream down".to_string())));
    }

    #[test]
    fn test_api_error_empty_body_uses_reason_phrase() {
        let err = DigipayError::from_response(StatusCode::NOT_FOUND, b"");
        assert_eq!(err.api_message(), Some("Not Found"));
        assert_eq!(err.status_code(), Some(404));
    }

    #[test]
    fn test_error_is_auth_error() {
        let missing = DigipayError::Authentication {
            message: "no credential".to_string(),
        };
        assert!(missing.is_auth_error());
        assert_eq!(missing.status_code(), None);

        let unauthorized = DigipayError::from_response(StatusCode::UNAUTHORIZED, br#"{"message":"Invalid API key"}"#);
        assert!(unauthorized.is_auth_error());

        let conflict = DigipayError::from_response(StatusCode::CONFLICT, b"{}");
        assert!(!conflict.is_auth_error());
    }

    #[test]
    fn test_decode_error_is_transport_class() {
        let source = serde_json::from_str::<Value>("<html>").unwrap_err();
        let err = DigipayError::Decode { status: 200, source };

        assert!(err.is_transport());
        assert!(!err.is_api_error());
        assert_eq!(err.status_code(), Some(200));
    }

    #[test]
    fn test_config_error_classification() {
        assert!(DigipayError::Config("API key is required".to_string()).is_config_error());
        assert!(!DigipayError::Config(String::new()).is_transport());
    }
}
