//! # chainreq
//!
//! Chainable HTTP request builder. A request is described step by step and then sent
//! with a single `call`, which returns the body text, the response, and every error
//! collected along the way.
//!
//! Configuration never fails eagerly: a bad proxy URL or an unserializable payload is
//! recorded on the builder, and `call` refuses to touch the network while any error
//! is recorded.
//!
//! ```no_run
//! let (body, response, errors) = chainreq::new("https://httpbin.org/post")
//!     .post()
//!     .content_type("form")
//!     .send_struct(&serde_json::json!({"q": "rust", "tags": ["a", "b"]}))
//!     .call();
//!
//! for error in &errors {
//!     eprintln!("request failed: {error}");
//! }
//! if let Some(response) = response {
//!     println!("{}: {body}", response.status());
//! }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod builder;

pub use builder::*;

pub use chainreq_client::{
    Error, HttpConfig, HttpError, HttpResponse, Kind, Method, ProxyConfig, StatusCode,
};

/// Start a request description for `url`.
///
/// The URL is only parsed when the request is dispatched.
#[must_use]
pub fn new(url: impl Into<String>) -> RequestSpec {
    RequestSpec::new(url)
}
