//! HTTP response handle
//!
//! The head (status, version, headers) is available as soon as `execute` returns.
//! The body stays on the connection until `read_to_end` drains it.

use std::sync::Arc;

use http::{HeaderMap, StatusCode, Version};
use http_body_util::BodyExt;
use hyper::body::Incoming;
use tokio::time::Instant;
use url::Url;

use crate::client::runtime::ClientRuntime;
use crate::error::{self, Result, TimedOut};

pub struct HttpResponse {
    status: StatusCode,
    version: Version,
    headers: HeaderMap,
    url: Url,
    body: Option<Incoming>,
    runtime: Arc<ClientRuntime>,
    deadline: Option<Instant>,
}

impl HttpResponse {
    pub(crate) fn new(
        parts: http::response::Parts,
        body: Incoming,
        url: Url,
        runtime: Arc<ClientRuntime>,
        deadline: Option<Instant>,
    ) -> Self {
        Self {
            status: parts.status,
            version: parts.version,
            headers: parts.headers,
            url,
            body: Some(body),
            runtime,
            deadline,
        }
    }

    #[inline]
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[inline]
    #[must_use]
    pub fn version(&self) -> Version {
        self.version
    }

    #[inline]
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The URL the request was sent to.
    #[inline]
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// `Content-Length` announced by the server, if any.
    #[must_use]
    pub fn content_length(&self) -> Option<u64> {
        self.headers
            .get(http::header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
    }

    /// Whether the body has already been drained.
    #[must_use]
    pub fn is_body_consumed(&self) -> bool {
        self.body.is_none()
    }

    /// Read the remaining body into `buf`, returning the number of bytes appended.
    ///
    /// Bytes received before a failure stay in `buf`. The body can only be read once;
    /// later calls append nothing.
    pub fn read_to_end(&mut self, buf: &mut Vec<u8>) -> Result<usize> {
        let Some(mut body) = self.body.take() else {
            return Ok(0);
        };
        let deadline = self.deadline;
        let url = self.url.clone();

        let read = async {
            let mut total = 0usize;
            while let Some(frame) = body.frame().await {
                let frame = frame.map_err(|e| error::body(e).with_url(url.clone()))?;
                if let Ok(data) = frame.into_data() {
                    total += data.len();
                    buf.extend_from_slice(&data);
                }
            }
            Ok::<usize, crate::Error>(total)
        };

        self.runtime.block_on(async {
            match deadline {
                Some(deadline) => match tokio::time::timeout_at(deadline, read).await {
                    Ok(result) => result,
                    Err(_) => Err(error::body(TimedOut).with_url(self.url.clone())),
                },
                None => read.await,
            }
        })
    }
}

impl std::fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpResponse")
            .field("url", &self.url.as_str())
            .field("status", &self.status)
            .field("version", &self.version)
            .field("headers", &self.headers)
            .field("body_consumed", &self.body.is_none())
            .finish()
    }
}
