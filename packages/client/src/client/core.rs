//! Core HTTP client implementation
//!
//! `HttpClient` is a blocking facade over a hyper HTTP/1.1 client connection driven
//! on a private current-thread tokio runtime. Each `execute` opens a fresh
//! connection; nothing is pooled.

use std::sync::Arc;

use bytes::Bytes;
use http::header::{HOST, HeaderValue, PROXY_AUTHORIZATION, USER_AGENT};
use http_body_util::Full;
use hyper_util::rt::TokioIo;
use tokio::time::Instant;

use super::runtime::ClientRuntime;

use crate::Url;
use crate::config::HttpConfig;
use crate::connect::{self, Conn, ConnectError};
use crate::error::{self, Result};
use crate::http::{HttpRequest, HttpResponse};
use crate::tls::TlsManager;

/// Blocking HTTP client
#[derive(Clone)]
pub struct HttpClient {
    config: HttpConfig,
    tls: TlsManager,
    runtime: Arc<ClientRuntime>,
}

impl HttpClient {
    /// Create a client with the default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(HttpConfig::default())
    }

    /// Create a client with a custom configuration.
    ///
    /// Fails with a builder error when called from within an async runtime.
    pub fn with_config(config: HttpConfig) -> Result<Self> {
        let runtime = ClientRuntime::new()?;
        let tls = TlsManager::new(config.accept_invalid_certs).map_err(error::builder)?;

        if let Some(proxy) = &config.proxy {
            tracing::debug!("client configured with proxy {}", proxy.url());
        }

        Ok(Self {
            config,
            tls,
            runtime: Arc::new(runtime),
        })
    }

    /// Get current configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Send `request` and wait for the response head.
    ///
    /// Blocks the calling thread. Called from within an async runtime it returns a
    /// builder error instead of blocking.
    pub fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = request.url().clone();
        match url.scheme() {
            "http" | "https" => {}
            _ => return Err(error::url_bad_scheme(url)),
        }

        let deadline = self.config.timeout.map(|t| Instant::now() + t);
        tracing::debug!("{} {}", request.method(), url);

        self.runtime.block_on(async {
            let Some(deadline) = deadline else {
                return self.send(request, None).await;
            };
            let sending = self.send(request, Some(deadline));
            match tokio::time::timeout_at(deadline, sending).await {
                Ok(result) => result,
                Err(_) => Err(error::timeout(url)),
            }
        })
    }

    async fn send(&self, request: HttpRequest, deadline: Option<Instant>) -> Result<HttpResponse> {
        let (method, url, mut headers, body) = request.into_parts();

        let conn = self.open(&url).await?;
        let forward_proxy = conn.is_forward_proxy();

        let (mut sender, connection) = hyper::client::conn::http1::handshake(TokioIo::new(conn.io))
            .await
            .map_err(|e| error::connect(e).with_url(url.clone()))?;
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::debug!("connection closed with error: {}", e);
            }
        });

        if !headers.contains_key(HOST) {
            let host = host_header(&url).map_err(|e| error::builder(e).with_url(url.clone()))?;
            headers.insert(HOST, host);
        }
        if !headers.contains_key(USER_AGENT)
            && let Ok(agent) = HeaderValue::from_str(&self.config.user_agent)
        {
            headers.insert(USER_AGENT, agent);
        }
        if forward_proxy
            && let Some(auth) = self.config.proxy.as_ref().and_then(|p| p.auth())
            && !headers.contains_key(PROXY_AUTHORIZATION)
        {
            headers.insert(PROXY_AUTHORIZATION, auth.clone());
        }

        let target = request_target(&url, forward_proxy);
        let mut wire = http::Request::builder()
            .method(method)
            .uri(target)
            .body(Full::new(body))
            .map_err(|e| error::builder(e).with_url(url.clone()))?;
        *wire.headers_mut() = headers;

        let response = sender
            .send_request(wire)
            .await
            .map_err(|e| error::request(e).with_url(url.clone()))?;

        tracing::debug!("{} responded {}", url, response.status());
        let (parts, body) = response.into_parts();
        Ok(HttpResponse::new(parts, body, url, Arc::clone(&self.runtime), deadline))
    }

    async fn open(&self, url: &Url) -> Result<Conn> {
        let connecting = connect::connect(url, &self.config, &self.tls);
        let conn = match self.config.connect_timeout {
            Some(limit) => match tokio::time::timeout(limit, connecting).await {
                Ok(conn) => conn,
                Err(_) => return Err(error::timeout(url.clone())),
            },
            None => connecting.await,
        };
        conn.map_err(|e: ConnectError| error::connect(e).with_url(url.clone()))
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("tls", &self.tls)
            .finish_non_exhaustive()
    }
}

/// Origin-form target for direct connections, absolute-form when talking to a
/// forwarding proxy.
fn request_target(url: &Url, forward_proxy: bool) -> String {
    if forward_proxy {
        let mut absolute = url.clone();
        absolute.set_fragment(None);
        return absolute.to_string();
    }
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

fn host_header(url: &Url) -> std::result::Result<HeaderValue, http::header::InvalidHeaderValue> {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => HeaderValue::from_str(&format!("{host}:{port}")),
        None => HeaderValue::from_str(host),
    }
}
