//! Transport configuration
//!
//! `HttpConfig` carries everything the client needs to know before a request is
//! executed: deadlines, socket options, the default user agent and the optional
//! proxy / certificate verification override.

pub mod core;

pub use core::HttpConfig;
