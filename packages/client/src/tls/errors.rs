//! TLS-specific error types

/// Failures while preparing or performing a TLS handshake
#[derive(Debug, thiserror::Error)]
pub enum TlsError {
    #[error("TLS configuration failed: {0}")]
    Configuration(#[from] rustls::Error),
    #[error("invalid server name '{0}'")]
    InvalidServerName(String),
    #[error("TLS handshake with {host} failed: {source}")]
    Handshake {
        host: String,
        #[source]
        source: std::io::Error,
    },
}
