//! Response processors
//!
//! A [`ResponseProcessor`] sees every buffered response after the response
//! logger and decides what the caller receives: the response itself, a
//! transformed response, or an error.

use std::fmt;

use crate::error::{Error, Result};
use crate::http::Response;

/// Post-processes a raw response before it is returned to the caller.
pub trait ResponseProcessor: Send + Sync + fmt::Debug {
    /// Process a response.
    ///
    /// # Errors
    ///
    /// Returns an error when the response should not reach the caller as-is.
    fn process(&self, response: Response) -> Result<Response>;
}

/// Default processor: 2xx passes through, any other status becomes an [`Error`]
/// built by [`Error::from_response`].
#[derive(Debug, Clone, Default)]
pub struct StatusResponseProcessor;

impl StatusResponseProcessor {
    /// Create the default processor.
    pub fn new() -> Self {
        Self
    }
}

impl ResponseProcessor for StatusResponseProcessor {
    fn process(&self, response: Response) -> Result<Response> {
        if response.is_success() {
            return Ok(response);
        }
        Err(Error::from_response(
            response.status().as_u16(),
            &response.text(),
            response.headers(),
        ))
    }
}

/// Processor returning every response unchanged, whatever its status.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughProcessor;

impl ResponseProcessor for PassthroughProcessor {
    fn process(&self, response: Response) -> Result<Response> {
        Ok(response)
    }
}
