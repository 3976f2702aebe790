//! Orchestrator error: any failure of a single upload, refresh, or download.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::catalog::ParseError;
use crate::materialize::{MaterializationError, MaterializationErrorKind};
use crate::transfer::{TransferError, TransferErrorKind};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Transfer(#[from] TransferError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Materialize(#[from] MaterializationError),
    /// The local file selected for upload could not be read.
    #[error("reading {}: {}", .path.display(), .source)]
    LocalRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A blocking worker panicked or was cancelled.
    #[error("worker task failed: {0}")]
    TaskJoin(String),
}

/// Coarse failure category pushed to the shell with `OperationFailed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transfer(TransferErrorKind),
    Parse,
    Materialize(MaterializationErrorKind),
    LocalRead,
    Internal,
}

impl SyncError {
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            SyncError::Transfer(e) => FailureKind::Transfer(e.kind),
            SyncError::Parse(_) => FailureKind::Parse,
            SyncError::Materialize(e) => FailureKind::Materialize(e.kind),
            SyncError::LocalRead { .. } => FailureKind::LocalRead,
            SyncError::TaskJoin(_) => FailureKind::Internal,
        }
    }
}
