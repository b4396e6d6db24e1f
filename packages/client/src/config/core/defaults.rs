//! Default implementations for HTTP configuration

use super::types::HttpConfig;

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            connect_timeout: None,
            tcp_nodelay: true,
            user_agent: concat!("chainreq/", env!("CARGO_PKG_VERSION")).to_string(),
            proxy: None,
            accept_invalid_certs: false,
        }
    }
}
