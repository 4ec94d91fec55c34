//! HTTP response representation

use std::time::Duration;

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use url::Url;

/// A fully buffered HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
    url: Option<Url>,
    elapsed: Duration,
}

impl Response {
    /// Create a response from its parts.
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
            url: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Attach the final URL (after redirects) and the time the exchange took.
    pub fn with_metadata(mut self, url: Url, elapsed: Duration) -> Self {
        self.url = Some(url);
        self.elapsed = elapsed;
        self
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get a header value by name, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get the raw body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consume the response, returning the body.
    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// Get the body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Final URL of the exchange, when known.
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// Time between sending the request and receiving the full body.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Check if the status is 2xx.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Check if the status is 4xx or 5xx.
    pub fn is_error(&self) -> bool {
        self.status.is_client_error() || self.status.is_server_error()
    }
}
