//! Core `RequestSpec` structure and base functionality
//!
//! A `RequestSpec` accumulates the description of one request. Configuration
//! methods consume and return the request so calls chain; a method that fails records
//! the error and the chain carries on. `call` consumes the request.

use hashbrown::HashMap;
use http::Method;

use chainreq_client::{HttpConfig, HttpError};

use crate::builder::payload::Payload;

/// Description of a single HTTP request under construction.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    /// Target URL, parsed at dispatch
    pub(crate) url: String,
    pub(crate) method: Option<Method>,
    /// One value per header name; names are stored as given
    pub(crate) headers: HashMap<String, String>,
    pub(crate) payload: Payload,
    /// Transport settings, including the proxy / TLS override
    pub(crate) config: HttpConfig,
    /// Errors in the order they happened; only ever appended to
    pub(crate) errors: Vec<HttpError>,
    pub(crate) debug_enabled: bool,
}

impl RequestSpec {
    /// Start describing a request to `url`.
    ///
    /// # Examples
    /// ```
    /// let spec = chainreq::RequestSpec::new("https://api.example.com/users");
    /// assert!(spec.errors().is_empty());
    /// assert!(spec.method().is_none());
    /// ```
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: None,
            headers: HashMap::new(),
            payload: Payload::None,
            config: HttpConfig::default(),
            errors: Vec::new(),
            debug_enabled: false,
        }
    }

    /// Replace the target URL.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Enable debug logging for this request
    ///
    /// When enabled, configuration steps and the dispatch decisions are logged at
    /// debug level through the `log` facade.
    #[must_use]
    pub fn debug(mut self) -> Self {
        self.debug_enabled = true;
        self
    }

    #[must_use]
    pub fn target(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn method(&self) -> Option<&Method> {
        self.method.as_ref()
    }

    /// Look up a header by its exact stored name.
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    #[must_use]
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Errors recorded so far, oldest first.
    #[must_use]
    pub fn errors(&self) -> &[HttpError] {
        &self.errors
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub(crate) fn record(&mut self, error: HttpError) {
        log::warn!("request to {}: {}", self.url, error);
        self.errors.push(error);
    }

    pub(crate) fn trace(&self, args: std::fmt::Arguments<'_>) {
        if self.debug_enabled {
            log::debug!("chainreq: {}", args);
        }
    }
}
