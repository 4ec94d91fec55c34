//! Request and response loggers
//!
//! Loggers observe traffic for diagnostics. They are called once per request
//! just before it is handed to the transport, and once per response just
//! before it reaches the response processor. The default implementations emit
//! structured `tracing` events; installing a subscriber is left to the
//! application.

use std::fmt;

use tracing::{debug, trace, warn};

use crate::http::{OutgoingRequest, Response};

/// Observes outgoing requests.
pub trait RequestLogger: Send + Sync + fmt::Debug {
    /// Called with the fully prepared request before it is sent.
    fn log_request(&self, request: &OutgoingRequest);
}

/// Observes incoming responses.
pub trait ResponseLogger: Send + Sync + fmt::Debug {
    /// Called with the buffered response and the request that produced it.
    fn log_response(&self, request: &OutgoingRequest, response: &Response);
}

/// Default request logger: one `debug` event per request, body at `trace`.
#[derive(Debug, Clone, Default)]
pub struct TracingRequestLogger;

impl TracingRequestLogger {
    /// Create the default request logger.
    pub fn new() -> Self {
        Self
    }
}

impl RequestLogger for TracingRequestLogger {
    fn log_request(&self, request: &OutgoingRequest) {
        debug!(
            method = %request.method(),
            url = %request.url(),
            headers = request.headers().len(),
            body_size = request.body_size(),
            "Sending HTTP request"
        );

        if let Some(body) = request.body() {
            trace!(body = %String::from_utf8_lossy(body), "Request body");
        }
    }
}

/// Default response logger: `debug` for 1xx-3xx, `warn` for 4xx/5xx.
#[derive(Debug, Clone, Default)]
pub struct TracingResponseLogger;

impl TracingResponseLogger {
    /// Create the default response logger.
    pub fn new() -> Self {
        Self
    }
}

impl ResponseLogger for TracingResponseLogger {
    fn log_response(&self, request: &OutgoingRequest, response: &Response) {
        let status = response.status().as_u16();
        let elapsed_ms = u64::try_from(response.elapsed().as_millis()).unwrap_or(u64::MAX);
        let body_size = response.body().len();

        if response.is_error() {
            warn!(
                method = %request.method(),
                url = %request.url(),
                status,
                elapsed_ms,
                body_size,
                "HTTP request failed"
            );
        } else {
            debug!(
                method = %request.method(),
                url = %request.url(),
                status,
                elapsed_ms,
                body_size,
                "HTTP response received"
            );
        }

        if !response.body().is_empty() {
            trace!(body = %response.text(), "Response body");
        }
    }
}

/// Logger that records nothing. Usable as either a request or a response logger.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl RequestLogger for NoopLogger {
    fn log_request(&self, _request: &OutgoingRequest) {}
}

impl ResponseLogger for NoopLogger {
    fn log_response(&self, _request: &OutgoingRequest, _response: &Response) {}
}
