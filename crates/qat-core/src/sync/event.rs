//! Shell boundary: commands in, events out.

use std::path::PathBuf;
use std::sync::Arc;

use super::error::FailureKind;
use crate::catalog::{AssetCatalog, AssetInfo};

/// Commands the presentation shell issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncCommand {
    Upload(PathBuf),
    RefreshCatalog,
    Download(AssetInfo),
    SetSearchQuery(String),
}

/// Which user-facing flow an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Upload,
    Refresh,
    Download,
}

/// Notifications pushed back to the shell.
#[derive(Debug, Clone)]
pub enum SyncEvent {
    CatalogUpdated(Arc<AssetCatalog>),
    OperationFailed {
        operation: Operation,
        kind: FailureKind,
        message: String,
    },
    OperationSucceeded {
        operation: Operation,
        summary: String,
    },
}
