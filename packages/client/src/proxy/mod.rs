//! Proxy configuration
//!
//! A single forward proxy can be installed on the transport. Plain `http` targets
//! are forwarded with an absolute-form request target, `https` targets are tunneled
//! with `CONNECT`.

pub mod types;
pub mod url_handling;

pub use types::{ProxyConfig, ProxyError};
pub use url_handling::encode_basic_auth;
