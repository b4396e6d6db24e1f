//! Core HTTP configuration types and default implementations
//!
//! - `types`: the `HttpConfig` struct
//! - `defaults`: default values
//! - `builders`: `with_*` builder methods

pub mod builders;
pub mod defaults;
pub mod types;

pub use types::HttpConfig;
