//! Connection type handed to the HTTP/1.1 handshake

use tokio::io::{AsyncRead, AsyncWrite};

/// Any byte stream a request can be written to.
pub trait AsyncConn: AsyncRead + AsyncWrite + Send + Unpin {}

impl<T> AsyncConn for T where T: AsyncRead + AsyncWrite + Send + Unpin {}

/// An established connection to the origin or to a forwarding proxy.
pub struct Conn {
    pub(crate) io: Box<dyn AsyncConn>,
    /// The peer is a proxy that expects absolute-form request targets.
    pub(crate) forward_proxy: bool,
}

impl Conn {
    pub(crate) fn direct<T: AsyncConn + 'static>(io: T) -> Self {
        Self { io: Box::new(io), forward_proxy: false }
    }

    pub(crate) fn forwarding<T: AsyncConn + 'static>(io: T) -> Self {
        Self { io: Box::new(io), forward_proxy: true }
    }

    #[must_use]
    pub fn is_forward_proxy(&self) -> bool {
        self.forward_proxy
    }
}

impl std::fmt::Debug for Conn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Conn")
            .field("forward_proxy", &self.forward_proxy)
            .finish_non_exhaustive()
    }
}
