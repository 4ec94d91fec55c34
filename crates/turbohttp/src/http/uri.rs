//! Conversion of string and structured URIs into request targets

use url::Url;

use crate::error::{Error, Result};

/// A value usable as the target of a request.
///
/// Implemented for string forms (`&str`, `String`, `&String`) and for the
/// structured [`Url`]. Only `http` and `https` targets are accepted.
pub trait IntoUri {
    /// Convert into an absolute `http`/`https` URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the value does not parse or uses
    /// another scheme.
    fn into_uri(self) -> Result<Url>;
}

impl IntoUri for Url {
    fn into_uri(self) -> Result<Url> {
        match self.scheme() {
            "http" | "https" => Ok(self),
            scheme => Err(Error::InvalidUrl(format!(
                "unsupported scheme '{}' in '{}', expected http or https",
                scheme, self
            ))),
        }
    }
}

impl IntoUri for &Url {
    fn into_uri(self) -> Result<Url> {
        self.clone().into_uri()
    }
}

impl IntoUri for &str {
    fn into_uri(self) -> Result<Url> {
        let trimmed = self.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidUrl("URL cannot be empty".to_string()));
        }
        Url::parse(trimmed)
            .map_err(|e| Error::InvalidUrl(format!("'{}': {}", trimmed, e)))?
            .into_uri()
    }
}

impl IntoUri for String {
    fn into_uri(self) -> Result<Url> {
        self.as_str().into_uri()
    }
}

impl IntoUri for &String {
    fn into_uri(self) -> Result<Url> {
        self.as_str().into_uri()
    }
}
