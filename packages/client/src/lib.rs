//! # chainreq client
//!
//! Blocking HTTP/1.1 transport used by the `chainreq` request builder.
//!
//! - Direct connections or a single forward HTTP proxy (`CONNECT` tunnels for `https`)
//! - rustls TLS with bundled Mozilla roots, or verification explicitly disabled
//! - Optional connect and exchange deadlines
//! - One error type with kind classification shared with the builder
//!
//! ## Usage
//!
//! ```no_run
//! use chainreq_client::{HttpClient, HttpRequest, Method, Url};
//!
//! let client = HttpClient::new()?;
//! let url = Url::parse("http://example.com/")?;
//! let mut response = client.execute(HttpRequest::new(Method::GET, url))?;
//! let mut body = Vec::new();
//! response.read_to_end(&mut body)?;
//! println!("{} ({} bytes)", response.status(), body.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod connect;
pub mod error;
pub mod http;
pub mod proxy;
pub mod tls;

pub use client::HttpClient;
pub use config::HttpConfig;
pub use error::{Error, HttpError, Kind, Result};
pub use crate::http::{HttpRequest, HttpResponse};
pub use proxy::{ProxyConfig, ProxyError};

pub use ::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Version};
pub use url::Url;
