//! HTTP request/response types and the per-request call builder
//!
//! This module holds the data that flows through the collaborators: the
//! [`RequestTemplate`] every request is seeded from, the [`OutgoingRequest`]
//! the request logger observes, the [`Response`] the response logger and
//! processor observe, and the [`Call`] that drives one request end to end.

pub use call::Call;
pub use request::OutgoingRequest;
pub use response::Response;
pub use template::RequestTemplate;
pub use uri::IntoUri;

mod call;
mod request;
mod response;
mod template;
mod uri;

// Re-export HTTP types from the http crate for convenience
pub use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};

use crate::error::{Error, Result};

/// Parse a header name/value pair, mapping failures to the matching error variant.
pub(crate) fn parse_header(key: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let name = key
        .parse::<HeaderName>()
        .map_err(|_| Error::InvalidHeaderName(key.to_string()))?;
    let value = value
        .parse::<HeaderValue>()
        .map_err(|_| Error::InvalidHeaderValue(value.to_string()))?;
    Ok((name, value))
}
