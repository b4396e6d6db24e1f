//! `HttpConfig` definition

use std::time::Duration;

use crate::proxy::ProxyConfig;

/// Settings applied by `HttpClient` to every exchange it performs.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Deadline for the whole exchange, from connect until the response head arrives.
    /// `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Deadline for establishing the connection, including proxy tunnel and TLS handshake.
    pub connect_timeout: Option<Duration>,
    /// Set `TCP_NODELAY` on the socket.
    pub tcp_nodelay: bool,
    /// `User-Agent` sent when the request carries none.
    pub user_agent: String,
    /// Route requests through this proxy.
    pub proxy: Option<ProxyConfig>,
    /// Skip server certificate verification.
    pub accept_invalid_certs: bool,
}
