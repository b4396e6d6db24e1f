//! Private runtime owned by a client and the responses it hands out

use std::future::Future;

use tokio::runtime::Runtime;

use crate::error::{self, Result};

/// Current-thread runtime that can be dropped from any context.
///
/// Dropping a plain `Runtime` inside an async context aborts the process, so the
/// runtime is shut down in the background instead.
pub(crate) struct ClientRuntime {
    runtime: Option<Runtime>,
}

impl ClientRuntime {
    pub(crate) fn new() -> Result<Self> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(error::builder(
                "HttpClient cannot be created inside an async runtime",
            ));
        }
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(error::builder)?;
        Ok(Self {
            runtime: Some(runtime),
        })
    }

    /// Drive `future` to completion on the calling thread.
    pub(crate) fn block_on<T, F>(&self, future: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(error::builder(
                "HttpClient cannot block inside an async runtime",
            ));
        }
        match &self.runtime {
            Some(runtime) => runtime.block_on(future),
            None => Err(error::request("client runtime has shut down")),
        }
    }
}

impl Drop for ClientRuntime {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

impl std::fmt::Debug for ClientRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientRuntime")
            .field("running", &self.runtime.is_some())
            .finish()
    }
}
