//! Error types for turbohttp
//!
//! The facade itself raises nothing; every variant here is produced by one of
//! the collaborators (transport, parser, response processor) and propagates
//! unchanged to the caller.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for operations that can fail with a turbohttp error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for turbohttp.
#[derive(Debug, Error)]
pub enum Error {
    /// Server rejected the request as malformed (400).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Authentication required or failed (401).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed (403).
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Conflict with the current state of the resource (409).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Request was well-formed but semantically invalid (422).
    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    /// Too many requests (429).
    #[error("Too many requests")]
    TooManyRequests {
        /// Value of the `retry-after` header, when it carried a number of seconds
        retry_after: Option<Duration>,
    },

    /// Server-side failure (5xx).
    #[error("Server error (status {status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// Any other non-success status.
    #[error("Unexpected status {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
        /// Request ID for debugging, from `x-request-id`
        request_id: Option<String>,
    },

    /// Network or connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Request timeout.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// HTTP client configuration or initialization error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid HTTP header name.
    #[error("Invalid HTTP header name: {0}")]
    InvalidHeaderName(String),

    /// Invalid HTTP header value.
    #[error("Invalid HTTP header value: {0}")]
    InvalidHeaderValue(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A non-JSON [`Parser`](crate::Parser) could not encode or decode a body.
    ///
    /// [`JsonParser`](crate::JsonParser) reports its failures as
    /// [`Error::Serialization`]; this variant is for other formats.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        /// Context description
        context: String,
        /// Underlying error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Other errors not covered by specific variants.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create a status error from an HTTP response status, body and headers.
    pub fn from_response(status: u16, body: &str, headers: &http::HeaderMap) -> Self {
        let message = body.to_string();
        match status {
            400 => Error::BadRequest(message),
            401 => Error::Unauthorized(message),
            403 => Error::Forbidden(message),
            404 => Error::NotFound(message),
            409 => Error::Conflict(message),
            422 => Error::UnprocessableEntity(message),
            429 => Error::TooManyRequests {
                retry_after: headers
                    .get(http::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.trim().parse::<u64>().ok())
                    .map(Duration::from_secs),
            },
            s if s >= 500 => Error::Server { status, message },
            _ => Error::Status {
                status,
                message,
                request_id: headers
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .map(String::from),
            },
        }
    }

    /// HTTP status code carried by this error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::BadRequest(_) => Some(400),
            Error::Unauthorized(_) => Some(401),
            Error::Forbidden(_) => Some(403),
            Error::NotFound(_) => Some(404),
            Error::Conflict(_) => Some(409),
            Error::UnprocessableEntity(_) => Some(422),
            Error::TooManyRequests { .. } => Some(429),
            Error::Server { status, .. } | Error::Status { status, .. } => Some(*status),
            Error::WithContext { source, .. } => {
                source.downcast_ref::<Error>().and_then(Error::status)
            }
            _ => None,
        }
    }

    /// Whether this error is a 4xx response.
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    /// Whether this error is a 5xx response.
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| s >= 500)
    }

    /// Add context to an error.
    pub fn context<C>(self, context: C) -> Self
    where
        C: std::fmt::Display + Send + Sync + 'static,
    {
        Error::WithContext {
            context: context.to_string(),
            source: Box::new(self),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout(err.to_string())
        } else if err.is_connect() {
            Error::Connection(err.to_string())
        } else if err.is_builder() {
            Error::HttpClient(err.to_string())
        } else {
            Error::Connection(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(400, Some(400))]
    #[case(401, Some(401))]
    #[case(403, Some(403))]
    #[case(404, Some(404))]
    #[case(409, Some(409))]
    #[case(422, Some(422))]
    #[case(429, Some(429))]
    #[case(500, Some(500))]
    #[case(503, Some(503))]
    #[case(418, Some(418))]
    #[case(302, Some(302))]
    fn test_from_response_keeps_status(#[case] status: u16, #[case] expected: Option<u16>) {
        let error = Error::from_response(status, "body", &http::HeaderMap::new());
        assert_eq!(error.status(), expected);
    }

    #[test]
    fn test_from_response_variants() {
        let headers = http::HeaderMap::new();

        assert!(matches!(
            Error::from_response(404, "missing", &headers),
            Error::NotFound(msg) if msg == "missing"
        ));
        assert!(matches!(
            Error::from_response(502, "bad gateway", &headers),
            Error::Server { status: 502, .. }
        ));
        assert!(matches!(
            Error::from_response(418, "teapot", &headers),
            Error::Status { status: 418, request_id: None, .. }
        ));
    }

    #[test]
    fn test_too_many_requests_retry_after() {
        let mut headers = http::HeaderMap::new();
        headers.insert("retry-after", "60".parse().unwrap());

        match Error::from_response(429, "", &headers) {
            Error::TooManyRequests { retry_after } => {
                assert_eq!(retry_after, Some(Duration::from_secs(60)));
            }
            other => panic!("Expected TooManyRequests, got {other:?}"),
        }

        // HTTP-date form is not interpreted
        let mut headers = http::HeaderMap::new();
        headers.insert(
            "retry-after",
            "Wed, 21 Oct 2015 07:28:00 GMT".parse().unwrap(),
        );
        assert!(matches!(
            Error::from_response(429, "", &headers),
            Error::TooManyRequests { retry_after: None }
        ));
    }

    #[test]
    fn test_status_request_id() {
        let mut headers = http::HeaderMap::new();
        headers.insert("x-request-id", "req_123".parse().unwrap());

        match Error::from_response(405, "not allowed", &headers) {
            Error::Status { request_id, .. } => assert_eq!(request_id.as_deref(), Some("req_123")),
            other => panic!("Expected Status, got {other:?}"),
        }
    }

    #[test]
    fn test_client_and_server_classification() {
        let headers = http::HeaderMap::new();
        assert!(Error::from_response(400, "", &headers).is_client_error());
        assert!(!Error::from_response(400, "", &headers).is_server_error());
        assert!(Error::from_response(500, "", &headers).is_server_error());
        assert!(!Error::Connection("refused".into()).is_client_error());
        assert!(!Error::Connection("refused".into()).is_server_error());
    }

    #[test]
    fn test_error_context() {
        let error = Error::NotFound("resource".to_string());
        let with_context = error.context("Failed to fetch user");

        match &with_context {
            Error::WithContext { context, .. } => assert_eq!(context, "Failed to fetch user"),
            _ => panic!("Expected WithContext variant"),
        }
        // status survives the wrapping
        assert_eq!(with_context.status(), Some(404));
    }

    #[test]
    fn test_error_with_context_chain() {
        let with_context = Error::NotFound("user".to_string())
            .context("Failed to fetch")
            .context("Operation failed");

        let error_string = with_context.to_string();
        assert!(error_string.contains("Operation failed"));
        assert!(error_string.contains("Failed to fetch"));
    }
}
