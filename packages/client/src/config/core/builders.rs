//! Builder methods for HTTP configuration

use std::time::Duration;

use super::types::HttpConfig;
use crate::proxy::ProxyConfig;

impl HttpConfig {
    /// Set the deadline for the whole exchange.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use chainreq_client::HttpConfig;
    ///
    /// let config = HttpConfig::default().with_timeout(Duration::from_secs(5));
    /// assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    /// ```
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the deadline for establishing the connection.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_tcp_nodelay(mut self, enabled: bool) -> Self {
        self.tcp_nodelay = enabled;
        self
    }

    /// Set the default `User-Agent`.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Route requests through `proxy`.
    #[must_use]
    pub fn with_proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Disable or re-enable server certificate verification.
    ///
    /// With verification disabled any certificate is accepted, including expired,
    /// self-signed and hostname-mismatched ones. Only use this against endpoints you
    /// control.
    #[must_use]
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Whether this configuration differs from the default transport.
    #[must_use]
    pub fn is_override(&self) -> bool {
        self.proxy.is_some() || self.accept_invalid_certs
    }
}
