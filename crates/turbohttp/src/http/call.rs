//! Per-request call builder

use std::time::Duration;

use bytes::Bytes;
use http::{HeaderValue, header};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{OutgoingRequest, Response, parse_header};
use crate::client::Client;
use crate::error::{Error, Result};
use crate::parser::parse_as;

/// One request bound to a [`Client`].
///
/// Created by the client's verb methods and seeded from its
/// [`RequestTemplate`](super::RequestTemplate). Errors from an invalid URI,
/// header or body are kept and surface from the terminal operations
/// ([`send`](Self::send), [`text`](Self::text), [`json`](Self::json)).
#[must_use = "a Call does nothing until it is sent"]
#[derive(Debug)]
pub struct Call {
    client: Client,
    request: Result<OutgoingRequest>,
}

impl Call {
    pub(crate) fn new(client: Client, request: Result<OutgoingRequest>) -> Self {
        Self { client, request }
    }

    fn map_request(
        mut self,
        f: impl FnOnce(OutgoingRequest) -> Result<OutgoingRequest>,
    ) -> Self {
        self.request = self.request.and_then(f);
        self
    }

    /// Set a header on this request, replacing any template value.
    pub fn header(self, key: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.map_request(|mut request| {
            let (name, value) = parse_header(key.as_ref(), value.as_ref())?;
            request.headers_mut().insert(name, value);
            Ok(request)
        })
    }

    /// Set the timeout for this request only.
    pub fn timeout(self, timeout: Duration) -> Self {
        self.map_request(|mut request| {
            request.set_timeout(Some(timeout));
            Ok(request)
        })
    }

    /// Set a typed body, encoded by the client's parser.
    ///
    /// A `Content-Type` naming the parser's media type is added unless one is
    /// already present.
    pub fn body<T: Serialize>(self, body: &T) -> Self {
        let parser = self.client.parser().clone();
        self.map_request(|mut request| {
            let bytes = parser.serialize(body)?;
            if !request.headers().contains_key(header::CONTENT_TYPE) {
                let content_type = parser.content_type();
                let value = content_type
                    .parse::<HeaderValue>()
                    .map_err(|_| Error::InvalidHeaderValue(content_type.to_string()))?;
                request.headers_mut().insert(header::CONTENT_TYPE, value);
            }
            request.set_body(bytes);
            Ok(request)
        })
    }

    /// Set an already encoded body, sent as-is.
    pub fn raw_body(self, body: impl Into<Bytes>) -> Self {
        let body = body.into();
        self.map_request(|mut request| {
            request.set_body(body);
            Ok(request)
        })
    }

    /// The client this call was created from.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Finish building without sending.
    ///
    /// # Errors
    ///
    /// Returns the first error recorded while building the call.
    pub fn into_request(self) -> Result<OutgoingRequest> {
        self.request
    }

    /// Send the request and return the processed response.
    ///
    /// # Errors
    ///
    /// Returns an error if building the call failed, the transport failed, or
    /// the response processor rejected the response.
    pub async fn send(self) -> Result<Response> {
        let request = self.request?;
        self.client.execute(request).await
    }

    /// Send the request and return the response body as text.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send).
    pub async fn text(self) -> Result<String> {
        Ok(self.send().await?.text())
    }

    /// Send the request and decode the response body with the client's parser.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send); additionally fails if the body does not decode into `T`.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        let parser = self.client.parser().clone();
        let response = self.send().await?;
        parse_as(parser.as_ref(), response.body())
    }
}
