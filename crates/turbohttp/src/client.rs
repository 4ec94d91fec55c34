//! HTTP client and its builder

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    config::ClientConfig,
    error::Result,
    http::{Call, IntoUri, Method, OutgoingRequest, RequestTemplate, Response, parse_header},
    logger::{RequestLogger, ResponseLogger, TracingRequestLogger, TracingResponseLogger},
    parser::{JsonParser, Parser},
    processor::{ResponseProcessor, StatusResponseProcessor},
};

/// Immutable HTTP client wired to its collaborators.
///
/// Every request goes through the same pipeline: the [`RequestTemplate`]
/// seeds it, the request logger observes it, the transport sends it, the
/// response logger observes the buffered response and the response
/// processor decides what the caller gets back.
///
/// Cloning is cheap; clones share the transport and collaborators.
///
/// # Example
///
/// ```rust,no_run
/// use turbohttp::Client;
///
/// # async fn example() -> turbohttp::Result<()> {
/// let client = Client::builder().build()?;
/// let body = client.get("https://example.com/health").text().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Client {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    http_client: reqwest::Client,
    base_request: RequestTemplate,
    parser: Arc<dyn Parser>,
    request_logger: Arc<dyn RequestLogger>,
    response_logger: Arc<dyn ResponseLogger>,
    response_processor: Arc<dyn ResponseProcessor>,
}

impl Client {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Start a request with an arbitrary method.
    pub fn request(&self, method: Method, uri: impl IntoUri) -> Call {
        let request = uri
            .into_uri()
            .map(|url| self.inner.base_request.prepare(method, url));
        Call::new(self.clone(), request)
    }

    /// Start a GET request.
    pub fn get(&self, uri: impl IntoUri) -> Call {
        self.request(Method::GET, uri)
    }

    /// Start a POST request without a body.
    pub fn post(&self, uri: impl IntoUri) -> Call {
        self.request(Method::POST, uri)
    }

    /// Start a POST request with a typed body.
    pub fn post_with<T: Serialize>(&self, uri: impl IntoUri, body: &T) -> Call {
        self.post(uri).body(body)
    }

    /// Start a PUT request without a body.
    pub fn put(&self, uri: impl IntoUri) -> Call {
        self.request(Method::PUT, uri)
    }

    /// Start a PUT request with a typed body.
    pub fn put_with<T: Serialize>(&self, uri: impl IntoUri, body: &T) -> Call {
        self.put(uri).body(body)
    }

    /// Start a DELETE request.
    pub fn delete(&self, uri: impl IntoUri) -> Call {
        self.request(Method::DELETE, uri)
    }

    /// The template requests are seeded from.
    pub fn base_request(&self) -> &RequestTemplate {
        &self.inner.base_request
    }

    /// The parser encoding request bodies and decoding responses.
    pub fn parser(&self) -> &Arc<dyn Parser> {
        &self.inner.parser
    }

    /// The request logger.
    pub fn request_logger(&self) -> &Arc<dyn RequestLogger> {
        &self.inner.request_logger
    }

    /// The response logger.
    pub fn response_logger(&self) -> &Arc<dyn ResponseLogger> {
        &self.inner.response_logger
    }

    /// The response processor.
    pub fn response_processor(&self) -> &Arc<dyn ResponseProcessor> {
        &self.inner.response_processor
    }

    /// The underlying reqwest client.
    pub fn http_client(&self) -> &reqwest::Client {
        &self.inner.http_client
    }

    pub(crate) async fn execute(&self, request: OutgoingRequest) -> Result<Response> {
        self.inner.request_logger.log_request(&request);

        let started = Instant::now();
        let raw = match request.to_reqwest(&self.inner.http_client).send().await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(
                    method = %request.method(),
                    url = %request.url(),
                    error = %e,
                    "HTTP transport error"
                );
                return Err(e.into());
            }
        };

        let status = raw.status();
        let headers = raw.headers().clone();
        let url = raw.url().clone();
        let body = raw.bytes().await?;

        let response = Response::new(status, headers, body).with_metadata(url, started.elapsed());
        self.inner.response_logger.log_response(&request, &response);

        self.inner.response_processor.process(response)
    }
}

/// Builder for creating a configured [`Client`].
///
/// Collaborators that are not supplied are defaulted at [`build`](Self::build):
/// [`JsonParser`], [`TracingRequestLogger`], [`TracingResponseLogger`],
/// [`StatusResponseProcessor`] and an empty [`RequestTemplate`] carrying the
/// resolved parser.
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
    http_client: Option<reqwest::Client>,
    base_request: Option<RequestTemplate>,
    parser: Option<Arc<dyn Parser>>,
    request_logger: Option<Arc<dyn RequestLogger>>,
    response_logger: Option<Arc<dyn ResponseLogger>>,
    response_processor: Option<Arc<dyn ResponseProcessor>>,
}

impl ClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole transport configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the default timeout for requests.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Add a custom default header at the transport level.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid according to HTTP specifications.
    pub fn default_header(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let (key, value) = parse_header(key.as_ref(), value.as_ref())?;
        self.config.default_headers.insert(key, value);
        Ok(self)
    }

    /// Set the HTTP proxy.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.config.proxy = Some(proxy.into());
        self
    }

    /// Use a prebuilt reqwest client instead of building one from the configuration.
    pub fn http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Set the request template.
    pub fn base_request(mut self, base_request: RequestTemplate) -> Self {
        self.base_request = Some(base_request);
        self
    }

    /// Set the parser.
    pub fn parser(mut self, parser: Arc<dyn Parser>) -> Self {
        self.parser = Some(parser);
        self
    }

    /// Set the request logger.
    pub fn request_logger(mut self, logger: Arc<dyn RequestLogger>) -> Self {
        self.request_logger = Some(logger);
        self
    }

    /// Set the response logger.
    pub fn response_logger(mut self, logger: Arc<dyn ResponseLogger>) -> Self {
        self.response_logger = Some(logger);
        self
    }

    /// Set the response processor.
    pub fn response_processor(mut self, processor: Arc<dyn ResponseProcessor>) -> Self {
        self.response_processor = Some(processor);
        self
    }

    /// Build the client with the configured options.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot be constructed from the
    /// configuration (invalid proxy or user agent, TLS backend failure).
    pub fn build(self) -> Result<Client> {
        let parser = self
            .parser
            .unwrap_or_else(|| Arc::new(JsonParser::new()));

        let mut base_request = self.base_request.unwrap_or_default();
        if base_request.parser().is_none() {
            base_request = base_request.with_parser(parser.clone());
        }

        let http_client = match self.http_client {
            Some(http_client) => http_client,
            None => self.config.to_reqwest()?,
        };

        let inner = ClientInner {
            http_client,
            base_request,
            parser,
            request_logger: self
                .request_logger
                .unwrap_or_else(|| Arc::new(TracingRequestLogger::new())),
            response_logger: self
                .response_logger
                .unwrap_or_else(|| Arc::new(TracingResponseLogger::new())),
            response_processor: self
                .response_processor
                .unwrap_or_else(|| Arc::new(StatusResponseProcessor::new())),
        };

        debug!(
            parser = ?inner.parser,
            request_logger = ?inner.request_logger,
            response_logger = ?inner.response_logger,
            response_processor = ?inner.response_processor,
            "Built HTTP client"
        );

        Ok(Client {
            inner: Arc::new(inner),
        })
    }
}
