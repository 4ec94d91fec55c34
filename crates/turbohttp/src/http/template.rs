//! Request-builder template

use std::sync::Arc;
use std::time::Duration;

use http::{HeaderMap, HeaderValue, Method, header};
use url::Url;

use super::{OutgoingRequest, parse_header};
use crate::error::Result;
use crate::parser::Parser;

/// Base request every [`Call`](super::Call) is seeded from.
///
/// Holds the headers and timeout shared by all requests of a client, and the
/// parser whose content type outgoing requests advertise. The factory always
/// attaches its resolved parser before the template reaches the client
/// builder.
#[derive(Debug, Clone, Default)]
pub struct RequestTemplate {
    headers: HeaderMap,
    timeout: Option<Duration>,
    parser: Option<Arc<dyn Parser>>,
}

impl RequestTemplate {
    /// Create an empty template.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header sent with every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid according to HTTP specifications.
    pub fn header(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let (name, value) = parse_header(key.as_ref(), value.as_ref())?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Set the timeout applied to every request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Attach a parser.
    pub fn with_parser(mut self, parser: Arc<dyn Parser>) -> Self {
        self.parser = Some(parser);
        self
    }

    /// Get the attached parser, if any.
    pub fn parser(&self) -> Option<&Arc<dyn Parser>> {
        self.parser.as_ref()
    }

    /// Get the template headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the template timeout.
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout
    }

    /// Start a request from this template.
    ///
    /// The request carries the template headers, the template timeout, and an
    /// `Accept` header naming the parser's content type unless the template
    /// already sets one.
    pub fn prepare(&self, method: Method, url: Url) -> OutgoingRequest {
        let mut request = OutgoingRequest::new(method, url);
        request.headers_mut().extend(self.headers.clone());

        if let Some(parser) = &self.parser
            && !request.headers().contains_key(header::ACCEPT)
            && let Ok(value) = parser.content_type().parse::<HeaderValue>()
        {
            request.headers_mut().insert(header::ACCEPT, value);
        }

        request.set_timeout(self.timeout);
        request
    }
}
