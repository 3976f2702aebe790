//! Materialization error type.

use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterializationErrorKind {
    /// Creating directories, writing, renaming, or removing files failed.
    IoFailure,
    /// The zip payload could not be read, or an entry points outside the destination.
    ArchiveCorrupt,
    /// The package importer reported failure.
    ImportFailed,
    /// The asset name cannot be used as a local filename.
    InvalidName,
}

/// Turning downloaded bytes into local files failed.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct MaterializationError {
    pub kind: MaterializationErrorKind,
    pub message: String,
}

impl MaterializationError {
    pub fn new(kind: MaterializationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn io(what: &str, path: &Path, e: io::Error) -> Self {
        Self::new(
            MaterializationErrorKind::IoFailure,
            format!("{} {}: {}", what, path.display(), e),
        )
    }

    pub fn archive(message: impl Into<String>) -> Self {
        Self::new(MaterializationErrorKind::ArchiveCorrupt, message)
    }

    pub fn import(package: &str, e: &anyhow::Error) -> Self {
        Self::new(
            MaterializationErrorKind::ImportFailed,
            format!("importing package {}: {:#}", package, e),
        )
    }

    pub fn invalid_name(name: &str, problem: &str) -> Self {
        Self::new(
            MaterializationErrorKind::InvalidName,
            format!("invalid asset name {:?}: {}", name, problem),
        )
    }
}
