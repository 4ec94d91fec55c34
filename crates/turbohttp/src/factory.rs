//! Fluent client factory with static request shortcuts

use std::sync::Arc;

use serde::Serialize;

use crate::{
    client::{Client, ClientBuilder},
    error::Result,
    http::{Call, IntoUri, RequestTemplate},
    logger::{RequestLogger, ResponseLogger, TracingRequestLogger, TracingResponseLogger},
    parser::{JsonParser, Parser},
    processor::{ResponseProcessor, StatusResponseProcessor},
};

/// Assembles a [`Client`] from optional collaborators.
///
/// Every collaborator left unset is replaced by its default when the client
/// is built:
///
/// | Collaborator | Default |
/// |---|---|
/// | base request | [`RequestTemplate::new`] |
/// | parser | [`JsonParser`] |
/// | request logger | [`TracingRequestLogger`] |
/// | response logger | [`TracingResponseLogger`] |
/// | response processor | [`StatusResponseProcessor`] |
/// | client builder | [`ClientBuilder::default`] |
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use turbohttp::{JsonParser, NoopLogger, TurboHttp};
///
/// # async fn example() -> turbohttp::Result<()> {
/// let client = TurboHttp::builder()
///     .parser(Arc::new(JsonParser::pretty()))
///     .request_logger(Arc::new(NoopLogger))
///     .client()?;
///
/// let status = client.get("https://example.com").send().await?.status();
///
/// // One-off requests use a default factory each time
/// let body = TurboHttp::get("https://example.com")?.text().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct TurboHttp {
    base_request: Option<RequestTemplate>,
    parser: Option<Arc<dyn Parser>>,
    request_logger: Option<Arc<dyn RequestLogger>>,
    response_logger: Option<Arc<dyn ResponseLogger>>,
    response_processor: Option<Arc<dyn ResponseProcessor>>,
    client_builder: Option<ClientBuilder>,
}

impl TurboHttp {
    /// Create a factory with every collaborator unset.
    pub fn builder() -> Self {
        Self::default()
    }

    /// Build a client from a factory with every collaborator defaulted.
    ///
    /// # Errors
    ///
    /// Returns an error if the default transport cannot be constructed.
    pub fn new_client() -> Result<Client> {
        Self::builder().build()
    }

    /// Issue a GET through a freshly built default client.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built. URI errors surface
    /// from the returned [`Call`].
    pub fn get(uri: impl IntoUri) -> Result<Call> {
        Ok(Self::new_client()?.get(uri))
    }

    /// Issue a POST without a body through a freshly built default client.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built.
    pub fn post(uri: impl IntoUri) -> Result<Call> {
        Ok(Self::new_client()?.post(uri))
    }

    /// Issue a POST with a typed body through a freshly built default client.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built. Body encoding errors
    /// surface from the returned [`Call`].
    pub fn post_with<T: Serialize>(uri: impl IntoUri, body: &T) -> Result<Call> {
        Ok(Self::new_client()?.post_with(uri, body))
    }

    /// Issue a PUT without a body through a freshly built default client.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built.
    pub fn put(uri: impl IntoUri) -> Result<Call> {
        Ok(Self::new_client()?.put(uri))
    }

    /// Issue a PUT with a typed body through a freshly built default client.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built.
    pub fn put_with<T: Serialize>(uri: impl IntoUri, body: &T) -> Result<Call> {
        Ok(Self::new_client()?.put_with(uri, body))
    }

    /// Issue a DELETE through a freshly built default client.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built.
    pub fn delete(uri: impl IntoUri) -> Result<Call> {
        Ok(Self::new_client()?.delete(uri))
    }

    /// Set the template every request starts from.
    pub fn base_request(mut self, base_request: RequestTemplate) -> Self {
        self.base_request = Some(base_request);
        self
    }

    /// Set the body parser.
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

    /// Set the client builder the collaborators are wired into.
    ///
    /// The builder keeps its own transport settings; its collaborators are
    /// replaced by the ones resolved here.
    pub fn client_builder(mut self, builder: ClientBuilder) -> Self {
        self.client_builder = Some(builder);
        self
    }

    /// Resolve every collaborator and build the client.
    ///
    /// The factory is left untouched, so building again reuses the same
    /// instances.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`ClientBuilder::build`].
    pub fn build(&self) -> Result<Client> {
        let parser = self
            .parser
            .clone()
            .unwrap_or_else(|| Arc::new(JsonParser::new()));
        let base_request = self
            .base_request
            .clone()
            .unwrap_or_default()
            .with_parser(parser.clone());
        let request_logger = self
            .request_logger
            .clone()
            .unwrap_or_else(|| Arc::new(TracingRequestLogger::new()));
        let response_logger = self
            .response_logger
            .clone()
            .unwrap_or_else(|| Arc::new(TracingResponseLogger::new()));
        let response_processor = self
            .response_processor
            .clone()
            .unwrap_or_else(|| Arc::new(StatusResponseProcessor::new()));

        self.client_builder
            .clone()
            .unwrap_or_default()
            .base_request(base_request)
            .parser(parser)
            .request_logger(request_logger)
            .response_logger(response_logger)
            .response_processor(response_processor)
            .build()
    }

    /// Alias for [`build`](Self::build).
    ///
    /// # Errors
    ///
    /// See [`build`](Self::build).
    pub fn client(&self) -> Result<Client> {
        self.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Method;
    use crate::logger::NoopLogger;
    use crate::processor::PassthroughProcessor;
    use std::time::Duration;

    #[test]
    fn test_unset_fields_resolve_to_defaults() {
        let client = TurboHttp::builder().build().unwrap();

        assert!(format!("{:?}", client.parser()).contains("JsonParser"));
        assert!(format!("{:?}", client.request_logger()).contains("TracingRequestLogger"));
        assert!(format!("{:?}", client.response_logger()).contains("TracingResponseLogger"));
        assert!(
            format!("{:?}", client.response_processor()).contains("StatusResponseProcessor")
        );
        assert!(client.base_request().headers().is_empty());
    }

    #[test]
    fn test_setters_touch_only_their_field() {
        let factory = TurboHttp::builder().request_logger(Arc::new(NoopLogger));

        assert!(factory.request_logger.is_some());
        assert!(factory.base_request.is_none());
        assert!(factory.parser.is_none());
        assert!(factory.response_logger.is_none());
        assert!(factory.response_processor.is_none());
        assert!(factory.client_builder.is_none());

        let client = factory.build().unwrap();
        assert!(format!("{:?}", client.request_logger()).contains("NoopLogger"));
        assert!(format!("{:?}", client.response_logger()).contains("TracingResponseLogger"));
    }

    #[test]
    fn test_factory_parser_replaces_template_parser() {
        let template_parser: Arc<dyn Parser> = Arc::new(JsonParser::new());
        let factory_parser: Arc<dyn Parser> = Arc::new(JsonParser::pretty());

        let client = TurboHttp::builder()
            .base_request(RequestTemplate::new().with_parser(template_parser.clone()))
            .parser(factory_parser.clone())
            .build()
            .unwrap();

        let attached = client.base_request().parser().unwrap();
        assert!(Arc::ptr_eq(attached, &factory_parser));
        assert!(!Arc::ptr_eq(attached, &template_parser));
    }

    #[test]
    fn test_build_twice_reuses_instances() {
        let processor: Arc<dyn ResponseProcessor> = Arc::new(PassthroughProcessor);
        let factory = TurboHttp::builder().response_processor(processor.clone());

        let first = factory.build().unwrap();
        let second = factory.client().unwrap();

        assert!(Arc::ptr_eq(first.response_processor(), &processor));
        assert!(Arc::ptr_eq(second.response_processor(), &processor));
        // Defaults are fresh per build
        assert!(!Arc::ptr_eq(first.parser(), second.parser()));
    }

    #[test]
    fn test_client_builder_override_receives_factory_overrides() {
        let builder = ClientBuilder::new()
            .timeout(Duration::from_secs(1))
            .response_processor(Arc::new(StatusResponseProcessor::new()));
        let parser: Arc<dyn Parser> = Arc::new(JsonParser::pretty());
        let request_logger: Arc<dyn RequestLogger> = Arc::new(NoopLogger);
        let response_logger: Arc<dyn ResponseLogger> = Arc::new(NoopLogger);
        let processor: Arc<dyn ResponseProcessor> = Arc::new(PassthroughProcessor);

        let client = TurboHttp::builder()
            .client_builder(builder)
            .base_request(RequestTemplate::new().header("x-factory", "1").unwrap())
            .parser(parser.clone())
            .request_logger(request_logger.clone())
            .response_logger(response_logger.clone())
            .response_processor(processor.clone())
            .build()
            .unwrap();

        assert!(Arc::ptr_eq(client.parser(), &parser));
        assert!(Arc::ptr_eq(client.request_logger(), &request_logger));
        assert!(Arc::ptr_eq(client.response_logger(), &response_logger));
        assert!(Arc::ptr_eq(client.response_processor(), &processor));
        assert!(Arc::ptr_eq(client.base_request().parser().unwrap(), &parser));
        assert_eq!(client.base_request().headers()["x-factory"], "1");
    }

    #[test]
    fn test_client_builder_override_collaborators_replaced_by_defaults() {
        let builder_parser: Arc<dyn Parser> = Arc::new(JsonParser::pretty());
        let builder = ClientBuilder::new()
            .base_request(RequestTemplate::new().header("x-builder", "1").unwrap())
            .parser(builder_parser.clone())
            .request_logger(Arc::new(NoopLogger))
            .response_logger(Arc::new(NoopLogger))
            .response_processor(Arc::new(PassthroughProcessor));

        let client = TurboHttp::builder()
            .client_builder(builder)
            .build()
            .unwrap();

        assert!(format!("{:?}", client.request_logger()).contains("TracingRequestLogger"));
        assert!(format!("{:?}", client.response_logger()).contains("TracingResponseLogger"));
        assert!(
            format!("{:?}", client.response_processor()).contains("StatusResponseProcessor")
        );
        assert!(!Arc::ptr_eq(client.parser(), &builder_parser));
        assert!(Arc::ptr_eq(
            client.base_request().parser().unwrap(),
            client.parser()
        ));
        assert!(client.base_request().headers().is_empty());
    }

    #[test]
    fn test_static_shortcuts_prepare_verbs() {
        let body = serde_json::json!({"id": 1});
        let cases = [
            (TurboHttp::get("http://example.test/r").unwrap(), Method::GET),
            (TurboHttp::post("http://example.test/r").unwrap(), Method::POST),
            (
                TurboHttp::post_with("http://example.test/r", &body).unwrap(),
                Method::POST,
            ),
            (TurboHttp::put("http://example.test/r").unwrap(), Method::PUT),
            (
                TurboHttp::put_with("http://example.test/r", &body).unwrap(),
                Method::PUT,
            ),
            (TurboHttp::delete("http://example.test/r").unwrap(), Method::DELETE),
        ];

        for (call, expected) in cases {
            let request = call.into_request().unwrap();
            assert_eq!(request.method(), &expected);
            assert_eq!(request.url().as_str(), "http://example.test/r");
        }
    }
}
