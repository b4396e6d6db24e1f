//! rustls client configuration and handshakes

use std::sync::Arc;

use rustls::{ClientConfig, RootCertStore};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_rustls::TlsConnector;
use tokio_rustls::client::TlsStream;

use super::errors::TlsError;
use super::verifier::NoCertificateVerification;

/// Owns the rustls configuration shared by every handshake of one client.
#[derive(Clone)]
pub struct TlsManager {
    connector: TlsConnector,
    verify_certs: bool,
}

impl TlsManager {
    /// Build the client configuration.
    ///
    /// Trust anchors come from the bundled Mozilla root set. With
    /// `accept_invalid_certs` the chain is not verified at all.
    pub fn new(accept_invalid_certs: bool) -> Result<Self, TlsError> {
        let provider = rustls::crypto::ring::default_provider();
        let builder = ClientConfig::builder_with_provider(Arc::new(provider.clone()))
            .with_safe_default_protocol_versions()?;

        let mut config = if accept_invalid_certs {
            tracing::warn!("TLS certificate verification is disabled for this client");
            builder
                .dangerous()
                .with_custom_certificate_verifier(Arc::new(NoCertificateVerification::new(
                    provider,
                )))
                .with_no_client_auth()
        } else {
            let mut root_store = RootCertStore::empty();
            root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
            builder
                .with_root_certificates(root_store)
                .with_no_client_auth()
        };
        config.alpn_protocols = vec![b"http/1.1".to_vec()];

        Ok(Self {
            connector: TlsConnector::from(Arc::new(config)),
            verify_certs: !accept_invalid_certs,
        })
    }

    #[must_use]
    pub fn verifies_certificates(&self) -> bool {
        self.verify_certs
    }

    /// Perform a client handshake over an established stream.
    pub async fn handshake<S>(&self, host: &str, stream: S) -> Result<TlsStream<S>, TlsError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let server_name = rustls::pki_types::ServerName::try_from(host.to_string())
            .map_err(|_| TlsError::InvalidServerName(host.to_string()))?;

        let tls_stream = self
            .connector
            .connect(server_name, stream)
            .await
            .map_err(|source| TlsError::Handshake { host: host.to_string(), source })?;

        tracing::debug!("TLS connection established to {}", host);
        Ok(tls_stream)
    }
}

impl std::fmt::Debug for TlsManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsManager")
            .field("verify_certs", &self.verify_certs)
            .finish()
    }
}
