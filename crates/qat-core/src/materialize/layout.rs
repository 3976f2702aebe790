//! Where materialized assets land inside the workspace.
//!
//! ```text
//! <workspace>/QuantumAssetToolbox/DownloadedAssets/<name>   plain files
//! <workspace>/QuantumAssetToolbox/<name without .zip>/      extracted archives
//! ```

use std::path::{Path, PathBuf};

/// Toolbox directory created under the workspace.
pub const TOOLBOX_DIR: &str = "QuantumAssetToolbox";
/// Subdirectory for plain (non-archive) downloads.
pub const DOWNLOADS_DIR: &str = "DownloadedAssets";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceLayout {
    workspace: PathBuf,
    root: PathBuf,
}

impl WorkspaceLayout {
    /// Layout rooted at `<workspace>/QuantumAssetToolbox`.
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        let workspace = workspace.into();
        let root = workspace.join(TOOLBOX_DIR);
        Self { workspace, root }
    }

    /// The host project directory.
    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    /// Fixed local root every destination is derived from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn downloads_dir(&self) -> PathBuf {
        self.root.join(DOWNLOADS_DIR)
    }

    /// Destination of a plain file. `name` must already be validated.
    pub fn plain_file_path(&self, name: &str) -> PathBuf {
        self.downloads_dir().join(name)
    }

    /// Destination directory of an extracted archive. `stem` must already be validated.
    pub fn extract_dir(&self, stem: &str) -> PathBuf {
        self.root.join(stem)
    }
}
