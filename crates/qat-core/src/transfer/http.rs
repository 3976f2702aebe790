//! libcurl-backed transport: one Easy handle per request.
//!
//! Every call blocks the current thread; `TransferClient` runs them on
//! `spawn_blocking` so async callers only suspend at the network boundary.

use curl::easy::{Easy, Form};

use super::classify::{check_status, from_curl, validate_url};
use super::error::TransferError;
use super::Transport;
use crate::config::TransferConfig;

/// Blocking HTTP transport using the curl crate.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    opts: TransferConfig,
}

impl CurlTransport {
    pub fn new(opts: TransferConfig) -> Self {
        Self { opts }
    }

    /// Easy handle with URL, redirect and timeout options applied.
    fn prepare(&self, method: &str, url: &str) -> Result<Easy, TransferError> {
        validate_url(url)?;
        let err = |e: curl::Error| from_curl(method, url, &e);

        let mut easy = Easy::new();
        easy.url(url).map_err(err)?;
        easy.follow_location(true).map_err(err)?;
        easy.max_redirections(self.opts.max_redirections).map_err(err)?;
        easy.connect_timeout(self.opts.connect_timeout()).map_err(err)?;
        easy.timeout(self.opts.timeout()).map_err(err)?;
        Ok(easy)
    }

    /// Perform the request, collecting the response body, then check the status.
    fn perform(method: &str, url: &str, easy: &mut Easy) -> Result<Vec<u8>, TransferError> {
        let err = |e: curl::Error| from_curl(method, url, &e);
        let mut body = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(err)?;
            transfer.perform().map_err(err)?;
        }

        let code = easy.response_code().map_err(err)?;
        check_status(method, url, code)?;
        Ok(body)
    }
}

impl Transport for CurlTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>, TransferError> {
        let mut easy = self.prepare("GET", url)?;
        easy.get(true).map_err(|e| from_curl("GET", url, &e))?;
        let body = Self::perform("GET", url, &mut easy)?;
        tracing::debug!("GET {} -> {} bytes", url, body.len());
        Ok(body)
    }

    fn post_file(
        &self,
        url: &str,
        field: &str,
        file_name: &str,
        data: Vec<u8>,
    ) -> Result<(), TransferError> {
        let mut easy = self.prepare("POST", url)?;
        let size = data.len();

        let mut form = Form::new();
        form.part(field)
            .buffer(file_name, data)
            .add()
            .map_err(|e| TransferError::network(format!("build multipart form: {}", e)))?;
        easy.httppost(form)
            .map_err(|e| from_curl("POST", url, &e))?;

        let response = Self::perform("POST", url, &mut easy)?;
        tracing::debug!(
            "POST {} ({} as {:?}, {} bytes) -> {} response bytes",
            url,
            field,
            file_name,
            size,
            response.len()
        );
        Ok(())
    }
}
