//! HTTP CONNECT tunnel establishment
//!
//! Implements the CONNECT method for tunneling TLS traffic through an HTTP proxy,
//! with optional `Proxy-Authorization`.

use http::header::HeaderValue;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use super::ConnectError;

/// Upper bound for the proxy's CONNECT response head.
const MAX_RESPONSE_HEAD: usize = 8 * 1024;

/// Establish a CONNECT tunnel to `host:port` through an already connected proxy stream.
pub async fn establish_connect_tunnel(
    mut proxy_stream: TcpStream,
    host: &str,
    port: u16,
    auth: Option<&HeaderValue>,
) -> Result<TcpStream, ConnectError> {
    let authority = authority(host, port);
    let mut connect_request =
        format!("CONNECT {authority} HTTP/1.1\r\nHost: {authority}\r\n").into_bytes();
    if let Some(auth) = auth {
        connect_request.extend_from_slice(b"Proxy-Authorization: ");
        connect_request.extend_from_slice(auth.as_bytes());
        connect_request.extend_from_slice(b"\r\n");
    }
    connect_request.extend_from_slice(b"\r\n");

    proxy_stream
        .write_all(&connect_request)
        .await
        .map_err(ConnectError::Tunnel)?;

    // The proxy sends nothing past the response head until the client speaks, so
    // reading up to the blank line never consumes tunneled bytes.
    let mut head = Vec::with_capacity(256);
    let mut chunk = [0u8; 512];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        if head.len() > MAX_RESPONSE_HEAD {
            return Err(ConnectError::TunnelRejected("response head too large".to_string()));
        }
        let n = proxy_stream.read(&mut chunk).await.map_err(ConnectError::Tunnel)?;
        if n == 0 {
            return Err(ConnectError::TunnelRejected("proxy closed the connection".to_string()));
        }
        head.extend_from_slice(&chunk[..n]);
    }

    let status_line = head
        .split(|b| *b == b'\n')
        .next()
        .map(|line| String::from_utf8_lossy(line).trim().to_string())
        .unwrap_or_default();

    match parse_status(&status_line) {
        Some(code) if (200..300).contains(&code) => {
            tracing::debug!("CONNECT tunnel to {} established", authority);
            Ok(proxy_stream)
        }
        _ => Err(ConnectError::TunnelRejected(status_line)),
    }
}

fn authority(host: &str, port: u16) -> String {
    if host.contains(':') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}

fn parse_status(status_line: &str) -> Option<u16> {
    let mut parts = status_line.split_whitespace();
    let version = parts.next()?;
    if !version.starts_with("HTTP/") {
        return None;
    }
    parts.next()?.parse().ok()
}
