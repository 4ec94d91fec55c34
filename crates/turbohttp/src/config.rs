//! Transport configuration for the HTTP client

use http::HeaderMap;
use std::time::Duration;

use crate::http::parse_header;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration of the underlying transport.
///
/// Only consulted when the [`ClientBuilder`](crate::ClientBuilder) constructs
/// its own `reqwest::Client`; a client supplied through
/// [`ClientBuilder::http_client`](crate::ClientBuilder::http_client) keeps its
/// own settings.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Total timeout for each request
    pub timeout: Duration,

    /// Timeout for establishing a connection
    pub connect_timeout: Duration,

    /// `User-Agent` header value
    pub user_agent: String,

    /// Custom headers to include with every request
    pub default_headers: HeaderMap,

    /// HTTP proxy URL
    pub proxy: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: default_user_agent(),
            default_headers: HeaderMap::new(),
            proxy: None,
        }
    }
}

fn default_user_agent() -> String {
    format!("turbohttp/{}", crate::VERSION)
}

impl ClientConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first, if present.
    /// This will look for:
    /// - `TURBOHTTP_TIMEOUT` for the request timeout (in seconds)
    /// - `TURBOHTTP_CONNECT_TIMEOUT` for the connection timeout (in seconds)
    /// - `TURBOHTTP_USER_AGENT` for the user agent
    /// - `TURBOHTTP_PROXY` for an HTTP proxy
    ///
    /// Values that do not parse are ignored.
    #[cfg(feature = "env")]
    pub fn from_env() -> crate::Result<Self> {
        use std::env;

        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        if let Ok(timeout_str) = env::var("TURBOHTTP_TIMEOUT")
            && let Ok(timeout_secs) = timeout_str.trim().parse::<u64>()
        {
            config.timeout = Duration::from_secs(timeout_secs);
        }

        if let Ok(timeout_str) = env::var("TURBOHTTP_CONNECT_TIMEOUT")
            && let Ok(timeout_secs) = timeout_str.trim().parse::<u64>()
        {
            config.connect_timeout = Duration::from_secs(timeout_secs);
        }

        if let Ok(user_agent) = env::var("TURBOHTTP_USER_AGENT")
            && !user_agent.trim().is_empty()
        {
            config.user_agent = user_agent;
        }

        if let Ok(proxy) = env::var("TURBOHTTP_PROXY")
            && !proxy.trim().is_empty()
        {
            config.proxy = Some(proxy);
        }

        tracing::debug!(
            timeout_secs = config.timeout.as_secs(),
            connect_timeout_secs = config.connect_timeout.as_secs(),
            proxy = config.proxy.is_some(),
            "Loaded client configuration from environment"
        );

        Ok(config)
    }

    /// Merge this configuration with another, with the other taking precedence.
    ///
    /// Fields of `other` still at their default value do not override.
    pub fn merge(mut self, other: ClientConfig) -> Self {
        if other.timeout != DEFAULT_TIMEOUT {
            self.timeout = other.timeout;
        }
        if other.connect_timeout != DEFAULT_CONNECT_TIMEOUT {
            self.connect_timeout = other.connect_timeout;
        }
        if other.user_agent != default_user_agent() {
            self.user_agent = other.user_agent;
        }
        for (key, value) in other.default_headers.iter() {
            self.default_headers.insert(key.clone(), value.clone());
        }
        if other.proxy.is_some() {
            self.proxy = other.proxy;
        }

        self
    }

    pub(crate) fn to_reqwest(&self) -> crate::Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .user_agent(self.user_agent.as_str())
            .default_headers(self.default_headers.clone());

        if let Some(proxy) = &self.proxy {
            let proxy = reqwest::Proxy::all(proxy.as_str())
                .map_err(|e| crate::Error::HttpClient(format!("Invalid proxy '{}': {}", proxy, e)))?;
            builder = builder.proxy(proxy);
        }

        builder
            .build()
            .map_err(|e| crate::Error::HttpClient(e.to_string()))
    }
}

/// Builder for creating ClientConfig with a fluent API.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout.
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

    /// Add a default header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid according to HTTP specifications.
    pub fn default_header(
        mut self,
        key: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> crate::Result<Self> {
        let (key, value) = parse_header(key.as_ref(), value.as_ref())?;
        self.config.default_headers.insert(key, value);
        Ok(self)
    }

    /// Set the HTTP proxy.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.config.proxy = Some(proxy.into());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
