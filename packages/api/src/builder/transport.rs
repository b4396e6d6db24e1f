//! Transport override: proxy, certificate verification and deadlines

use std::time::Duration;

use chainreq_client::{ProxyConfig, error};

use crate::builder::core::RequestSpec;

impl RequestSpec {
    /// Route the request through an HTTP proxy.
    ///
    /// An unparseable or unsupported proxy URL records a configuration error and leaves
    /// the transport unchanged. Certificate verification stays enabled; see
    /// [`danger_accept_invalid_certs`](Self::danger_accept_invalid_certs).
    ///
    /// # Examples
    /// ```
    /// let spec = chainreq::new("https://api.example.com").proxy("http://proxy.local:3128");
    /// assert!(spec.errors().is_empty());
    ///
    /// let spec = chainreq::new("https://api.example.com").proxy("::not a url::");
    /// assert!(spec.errors()[0].is_configuration());
    /// ```
    #[must_use]
    pub fn proxy(mut self, proxy_url: &str) -> Self {
        match ProxyConfig::parse(proxy_url) {
            Ok(proxy) => {
                self.trace(format_args!("proxy {}", proxy.url()));
                self.config.proxy = Some(proxy);
            }
            Err(e) => self.record(error::configuration(e)),
        }
        self
    }

    /// Disable server certificate verification.
    ///
    /// Any certificate is accepted, including self-signed and hostname-mismatched
    /// ones. Only use this against endpoints you control.
    #[must_use]
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        if accept {
            log::warn!("certificate verification disabled for request to {}", self.url);
        }
        self.config.accept_invalid_certs = accept;
        self
    }

    /// Route through `proxy_url` with certificate verification disabled.
    ///
    /// Verification is only disabled when the proxy was accepted.
    #[must_use]
    pub fn insecure_proxy(self, proxy_url: &str) -> Self {
        let before = self.errors.len();
        let spec = self.proxy(proxy_url);
        if spec.errors.len() == before {
            spec.danger_accept_invalid_certs(true)
        } else {
            spec
        }
    }

    /// Deadline for the whole exchange, body included.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Deadline for connecting, including proxy tunnel and TLS handshake.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    /// `User-Agent` sent when no such header is set.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Whether the transport differs from the default one.
    #[must_use]
    pub fn has_transport_override(&self) -> bool {
        self.config.is_override()
    }
}
