//! Connection establishment
//!
//! Opens the TCP stream for a request, either to the origin or to the configured
//! proxy, tunnels through the proxy when the target is `https`, and wraps the
//! stream in TLS where needed.

pub mod connection;
pub mod http_connect;

use tokio::net::TcpStream;

pub use connection::{AsyncConn, Conn};
pub use http_connect::establish_connect_tunnel;

use crate::Url;
use crate::config::HttpConfig;
use crate::tls::{TlsError, TlsManager};

/// Failures while opening a connection
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("url has no host")]
    MissingHost,
    #[error("tcp connect to {addr} failed: {source}")]
    Tcp {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("proxy tunnel failed: {0}")]
    Tunnel(#[source] std::io::Error),
    #[error("proxy refused tunnel: {0}")]
    TunnelRejected(String),
    #[error(transparent)]
    Tls(#[from] TlsError),
}

/// Host of `url` in the form sockets and SNI expect (IPv6 without brackets).
pub(crate) fn socket_host(url: &Url) -> Option<String> {
    match url.host()? {
        url::Host::Domain(domain) => Some(domain.to_string()),
        url::Host::Ipv4(addr) => Some(addr.to_string()),
        url::Host::Ipv6(addr) => Some(addr.to_string()),
    }
}

async fn open_tcp(host: &str, port: u16, config: &HttpConfig) -> Result<TcpStream, ConnectError> {
    let stream = TcpStream::connect((host, port))
        .await
        .map_err(|source| ConnectError::Tcp { addr: format!("{host}:{port}"), source })?;
    if let Err(e) = stream.set_nodelay(config.tcp_nodelay) {
        tracing::debug!("failed to set TCP_NODELAY on {}:{}: {}", host, port, e);
    }
    Ok(stream)
}

/// Connect to the peer responsible for `target`.
pub async fn connect(
    target: &Url,
    config: &HttpConfig,
    tls: &TlsManager,
) -> Result<Conn, ConnectError> {
    let host = socket_host(target).ok_or(ConnectError::MissingHost)?;
    let port = target.port_or_known_default().unwrap_or(80);
    let secure = target.scheme() == "https";

    match &config.proxy {
        Some(proxy) => {
            tracing::debug!("connecting to {} via proxy {}:{}", target, proxy.host(), proxy.port());
            let stream = open_tcp(&proxy.host(), proxy.port(), config).await?;
            if secure {
                let tunnel = establish_connect_tunnel(stream, &host, port, proxy.auth()).await?;
                let tls_stream = tls.handshake(&host, tunnel).await?;
                Ok(Conn::direct(tls_stream))
            } else {
                Ok(Conn::forwarding(stream))
            }
        }
        None => {
            tracing::debug!("connecting to {}:{}", host, port);
            let stream = open_tcp(&host, port, config).await?;
            if secure {
                let tls_stream = tls.handshake(&host, stream).await?;
                Ok(Conn::direct(tls_stream))
            } else {
                Ok(Conn::direct(stream))
            }
        }
    }
}
