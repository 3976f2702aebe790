//! Transfer client: outbound HTTP GET and multipart POST.
//!
//! No business logic and no retries live here; callers decide what a
//! failure means. The blocking `Transport` does the I/O and the async
//! `TransferClient` moves it off the caller's thread.

mod classify;
mod error;
mod http;

use std::sync::Arc;

pub use classify::{check_status, classify_curl_error, validate_url};
pub use error::{TransferError, TransferErrorKind};
pub use http::CurlTransport;

use crate::config::TransferConfig;

/// Multipart form field the upload endpoint reads the file from.
pub const UPLOAD_FIELD: &str = "file";

/// Blocking HTTP operations. Implementations must be safe to call from
/// several worker threads at once.
pub trait Transport: Send + Sync + 'static {
    /// GET `url`; Ok only for a 2xx status with the full body received.
    fn get(&self, url: &str) -> Result<Vec<u8>, TransferError>;

    /// POST `data` as a multipart part named `field` with filename `file_name`.
    fn post_file(
        &self,
        url: &str,
        field: &str,
        file_name: &str,
        data: Vec<u8>,
    ) -> Result<(), TransferError>;
}

/// Async front for a `Transport`. Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct TransferClient {
    transport: Arc<dyn Transport>,
}

impl TransferClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Client backed by libcurl with the given limits.
    pub fn with_curl(opts: TransferConfig) -> Self {
        Self::new(Arc::new(CurlTransport::new(opts)))
    }

    /// Upload one file as the `file` field of a multipart POST.
    pub async fn upload(
        &self,
        url: &str,
        file_bytes: Vec<u8>,
        file_name: &str,
    ) -> Result<(), TransferError> {
        let transport = Arc::clone(&self.transport);
        let url = url.to_string();
        let file_name = file_name.to_string();
        run_blocking(move || transport.post_file(&url, UPLOAD_FIELD, &file_name, file_bytes)).await
    }

    /// Fetch a document (e.g. the catalog JSON).
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, TransferError> {
        let transport = Arc::clone(&self.transport);
        let url = url.to_string();
        run_blocking(move || transport.get(&url)).await
    }

    /// Download an asset payload. Same contract as `fetch`.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>, TransferError> {
        self.fetch(url).await
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T, TransferError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, TransferError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| TransferError::network(format!("transfer worker failed: {}", e)))?
}
