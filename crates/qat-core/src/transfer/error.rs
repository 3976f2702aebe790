//! Transfer error type shared by every network operation.

use thiserror::Error;

/// What went wrong with a transfer. Lets the shell tell failures apart
/// without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferErrorKind {
    /// Connection, DNS, TLS, or truncated-body failure.
    NetworkFailure,
    /// Server answered with a non-2xx status.
    HttpStatus(u32),
    /// The request exceeded the configured timeout.
    Timeout,
    /// The URL is not an absolute http(s) URL; no request was made.
    InvalidUrl,
}

/// A failed upload, fetch, or download.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TransferError {
    pub kind: TransferErrorKind,
    pub message: String,
}

impl TransferError {
    pub fn new(kind: TransferErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(TransferErrorKind::NetworkFailure, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(TransferErrorKind::Timeout, message)
    }

    pub fn http_status(method: &str, url: &str, code: u32) -> Self {
        Self::new(
            TransferErrorKind::HttpStatus(code),
            format!("{} {} returned HTTP {}", method, url, code),
        )
    }

    pub fn invalid_url(url: &str, reason: impl std::fmt::Display) -> Self {
        Self::new(
            TransferErrorKind::InvalidUrl,
            format!("invalid URL {:?}: {}", url, reason),
        )
    }

    /// HTTP status code, if the server answered with an error status.
    pub fn status_code(&self) -> Option<u32> {
        match self.kind {
            TransferErrorKind::HttpStatus(code) => Some(code),
            _ => None,
        }
    }
}
