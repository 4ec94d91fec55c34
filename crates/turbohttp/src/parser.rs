//! Body parsers
//!
//! A [`Parser`] converts between typed request/response bodies and their wire
//! representation. It is attached to the [`RequestTemplate`](crate::http::RequestTemplate)
//! so outgoing requests advertise its content type, and used by the client to
//! encode request bodies and decode response bodies.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};

/// Media type produced and accepted by [`JsonParser`].
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Converts structured bodies to and from bytes.
///
/// The trait is object safe so a parser can be shared as `Arc<dyn Parser>`.
/// Decoding goes through a [`serde_json::Value`] document; use [`parse_as`]
/// for typed results.
pub trait Parser: Send + Sync + fmt::Debug {
    /// Media type written to `Content-Type` and `Accept` headers.
    fn content_type(&self) -> &str;

    /// Encode a request body.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented in this format.
    fn serialize(&self, body: &dyn erased_serde::Serialize) -> Result<Vec<u8>>;

    /// Decode a response body into a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not valid for this format.
    fn parse(&self, bytes: &[u8]) -> Result<Value>;
}

/// Decode `bytes` with `parser` and convert the document into `T`.
///
/// # Errors
///
/// Returns an error if the parser rejects the bytes or the document does not
/// match `T`.
pub fn parse_as<T: DeserializeOwned>(parser: &dyn Parser, bytes: &[u8]) -> Result<T> {
    let value = parser.parse(bytes)?;
    serde_json::from_value(value).map_err(Error::Serialization)
}

/// JSON parser backed by `serde_json`. This is the default parser.
#[derive(Debug, Clone, Default)]
pub struct JsonParser {
    pretty: bool,
}

impl JsonParser {
    /// Create a parser writing compact JSON.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser writing indented JSON.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Parser for JsonParser {
    fn content_type(&self) -> &str {
        JSON_CONTENT_TYPE
    }

    fn serialize(&self, body: &dyn erased_serde::Serialize) -> Result<Vec<u8>> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(body)?
        } else {
            serde_json::to_vec(body)?
        };
        Ok(bytes)
    }

    fn parse(&self, bytes: &[u8]) -> Result<Value> {
        // Empty bodies (204, bodiless 200) decode as null
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(bytes).map_err(Error::Serialization)
    }
}
