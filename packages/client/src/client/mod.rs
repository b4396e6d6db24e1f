//! Blocking HTTP client

pub mod core;
pub(crate) mod runtime;

pub use core::HttpClient;
