//! In-process servers for transport tests

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::http::{HeaderMap, Method, Uri};
use axum::routing::get;
use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_rustls::TlsAcceptor;

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Json<Value> {
    let headers: serde_json::Map<String, Value> = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                Value::String(value.to_str().unwrap_or_default().to_string()),
            )
        })
        .collect();

    Json(json!({
        "method": method.as_str(),
        "uri": uri.to_string(),
        "headers": headers,
        "body": String::from_utf8_lossy(&body),
    }))
}

async fn slow() -> &'static str {
    tokio::time::sleep(Duration::from_secs(3)).await;
    "late"
}

/// Start an echo server on its own runtime thread; every path echoes the request
/// as JSON except `/slow`, which answers after three seconds.
pub fn spawn_echo_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind echo server");
    listener.set_nonblocking(true).expect("Failed to set nonblocking");
    let addr = listener.local_addr().expect("Failed to read local addr");

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Failed to build server runtime");
        runtime.block_on(async move {
            let listener =
                tokio::net::TcpListener::from_std(listener).expect("Failed to adopt listener");
            let app = Router::new().route("/slow", get(slow)).fallback(echo);
            axum::serve(listener, app).await.expect("Echo server failed");
        });
    });

    addr
}

/// Start a server that announces a body longer than what it sends, then closes.
pub fn spawn_truncating_server(announced: usize, sent: &'static [u8]) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind truncating server");
    let addr = listener.local_addr().expect("Failed to read local addr");

    std::thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => return,
                    Ok(n) => head.extend_from_slice(&buf[..n]),
                }
            }
            let response = format!("HTTP/1.1 200 OK\r\nContent-Length: {announced}\r\n\r\n");
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.write_all(sent);
            let _ = stream.flush();
        }
    });

    addr
}

fn read_head<S: Read>(stream: &mut S) -> Option<Vec<u8>> {
    let mut head = Vec::new();
    let mut byte = [0u8; 1];
    while !head.ends_with(b"\r\n\r\n") {
        match stream.read(&mut byte) {
            Ok(0) | Err(_) => return None,
            Ok(_) => head.push(byte[0]),
        }
    }
    Some(head)
}

/// One-shot proxy that answers the CONNECT request with `reply`.
///
/// When `after_hello` is set, the proxy waits for the client's first bytes through
/// the tunnel and answers them with it before hanging up.
pub fn spawn_connect_proxy(
    reply: &'static [u8],
    after_hello: Option<&'static [u8]>,
) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind proxy");
    let addr = listener.local_addr().expect("Failed to read local addr");

    std::thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            if read_head(&mut stream).is_none() {
                return;
            }
            let _ = stream.write_all(reply);
            let _ = stream.flush();
            if let Some(answer) = after_hello {
                let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
                let mut hello = [0u8; 1024];
                let _ = stream.read(&mut hello);
                let _ = stream.write_all(answer);
                let _ = stream.flush();
            }
        }
    });

    addr
}

/// Self-signed certificate for `localhost`.
pub fn self_signed_localhost() -> (CertificateDer<'static>, PrivateKeyDer<'static>) {
    let key_pair = rcgen::KeyPair::generate().expect("Failed to generate key pair");
    let params = rcgen::CertificateParams::new(vec!["localhost".to_string()])
        .expect("Failed to build certificate params");
    let cert = params.self_signed(&key_pair).expect("Failed to self-sign certificate");
    let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(key_pair.serialize_der()));
    (cert.der().clone(), key)
}

/// Proxy that accepts every CONNECT and terminates TLS itself with a self-signed
/// `localhost` certificate, answering each tunneled request with `tunnel ok`.
pub fn spawn_tls_tunnel_proxy() -> SocketAddr {
    let (cert, key) = self_signed_localhost();
    let config = rustls::ServerConfig::builder_with_provider(Arc::new(
        rustls::crypto::ring::default_provider(),
    ))
    .with_safe_default_protocol_versions()
    .expect("Failed to select protocol versions")
    .with_no_client_auth()
    .with_single_cert(vec![cert], key)
    .expect("Failed to build server config");
    let acceptor = TlsAcceptor::from(Arc::new(config));

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind tunnel proxy");
    listener.set_nonblocking(true).expect("Failed to set nonblocking");
    let addr = listener.local_addr().expect("Failed to read local addr");

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Failed to build proxy runtime");
        runtime.block_on(async move {
            let listener =
                tokio::net::TcpListener::from_std(listener).expect("Failed to adopt listener");
            while let Ok((stream, _)) = listener.accept().await {
                let acceptor = acceptor.clone();
                tokio::spawn(async move {
                    let _ = serve_tunnel(stream, acceptor).await;
                });
            }
        });
    });

    addr
}

async fn serve_tunnel(
    mut stream: tokio::net::TcpStream,
    acceptor: TlsAcceptor,
) -> std::io::Result<()> {
    let mut head = Vec::new();
    while !head.ends_with(b"\r\n\r\n") {
        head.push(stream.read_u8().await?);
    }
    stream
        .write_all(b"HTTP/1.1 200 Connection established\r\n\r\n")
        .await?;

    let mut tls = acceptor.accept(stream).await?;
    let mut request = Vec::new();
    while !request.ends_with(b"\r\n\r\n") {
        request.push(tls.read_u8().await?);
    }
    let response = b"HTTP/1.1 200 OK\r\nContent-Length: 9\r\nConnection: close\r\n\r\ntunnel ok";
    tls.write_all(response).await?;
    tls.flush().await?;
    tls.shutdown().await
}
