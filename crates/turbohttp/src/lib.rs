//! # TurboHttp
//!
//! Fluent builder facade over an HTTP client:
//! - Static GET/POST/PUT/DELETE shortcuts
//! - Pluggable request template, parser, loggers and response processor
//! - Structured logging through `tracing`
//! - Typed errors for non-success statuses
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Post {
//!     title: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let posts: Vec<Post> = turbohttp::get("https://example.com/posts")?.json().await?;
//!
//!     let created = turbohttp::post_with(
//!         "https://example.com/posts",
//!         &Post { title: "Hello".into() },
//!     )?
//!     .send()
//!     .await?;
//!
//!     println!("{} posts, created: {}", posts.len(), created.status());
//!     Ok(())
//! }
//! ```
//!
//! ## Custom collaborators
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use turbohttp::prelude::*;
//!
//! # fn example() -> turbohttp::Result<()> {
//! let client = TurboHttp::builder()
//!     .base_request(RequestTemplate::new().header("x-tenant", "acme")?)
//!     .response_processor(Arc::new(PassthroughProcessor))
//!     .client()?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Re-export commonly used types
pub use client::{Client, ClientBuilder};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, Result};
pub use factory::TurboHttp;
pub use crate::http::{Call, IntoUri, OutgoingRequest, RequestTemplate, Response};
pub use logger::{NoopLogger, RequestLogger, ResponseLogger, TracingRequestLogger, TracingResponseLogger};
pub use parser::{JsonParser, Parser, parse_as};
pub use processor::{PassthroughProcessor, ResponseProcessor, StatusResponseProcessor};

// Module declarations
pub mod client;
pub mod config;
pub mod error;
pub mod factory;
pub mod http;
pub mod logger;
pub mod parser;
pub mod processor;

// Re-export key dependencies for convenience
pub use serde::{Deserialize, Serialize};
pub use serde_json::Value as JsonValue;
pub use url::Url;

/// Issue a GET through a freshly built default client.
///
/// Equivalent to [`TurboHttp::get`].
///
/// # Errors
///
/// Returns an error if the client cannot be built.
pub fn get(uri: impl IntoUri) -> Result<Call> {
    TurboHttp::get(uri)
}

/// Issue a POST without a body. Equivalent to [`TurboHttp::post`].
///
/// # Errors
///
/// Returns an error if the client cannot be built.
pub fn post(uri: impl IntoUri) -> Result<Call> {
    TurboHttp::post(uri)
}

/// Issue a POST with a typed body. Equivalent to [`TurboHttp::post_with`].
///
/// # Errors
///
/// Returns an error if the client cannot be built.
pub fn post_with<T: Serialize>(uri: impl IntoUri, body: &T) -> Result<Call> {
    TurboHttp::post_with(uri, body)
}

/// Issue a PUT without a body. Equivalent to [`TurboHttp::put`].
///
/// # Errors
///
/// Returns an error if the client cannot be built.
pub fn put(uri: impl IntoUri) -> Result<Call> {
    TurboHttp::put(uri)
}

/// Issue a PUT with a typed body. Equivalent to [`TurboHttp::put_with`].
///
/// # Errors
///
/// Returns an error if the client cannot be built.
pub fn put_with<T: Serialize>(uri: impl IntoUri, body: &T) -> Result<Call> {
    TurboHttp::put_with(uri, body)
}

/// Issue a DELETE. Equivalent to [`TurboHttp::delete`].
///
/// # Errors
///
/// Returns an error if the client cannot be built.
pub fn delete(uri: impl IntoUri) -> Result<Call> {
    TurboHttp::delete(uri)
}

/// Prelude module for common imports
///
/// # Examples
///
/// ```rust
/// use turbohttp::prelude::*;
/// ```
pub mod prelude {

    pub use crate::{
        Call, Client, ClientBuilder, ClientConfig, Error, JsonParser, NoopLogger,
        PassthroughProcessor, Parser, RequestLogger, RequestTemplate, Response, ResponseLogger,
        ResponseProcessor, Result, StatusResponseProcessor, TurboHttp,
    };
}

/// Crate version, automatically updated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_free_functions_match_factory() {
        let free = get("http://example.test/a").unwrap().into_request().unwrap();
        let assoc = TurboHttp::get("http://example.test/a")
            .unwrap()
            .into_request()
            .unwrap();

        assert_eq!(free.method(), assoc.method());
        assert_eq!(free.url(), assoc.url());
        assert_eq!(free.headers(), assoc.headers());
    }
}
