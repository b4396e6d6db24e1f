//! TLS support built on rustls

pub mod errors;
pub mod tls_manager;
mod verifier;

pub use errors::TlsError;
pub use tls_manager::TlsManager;
