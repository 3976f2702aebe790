//! Asset materializer: turn downloaded bytes into files in the workspace.
//!
//! The asset name alone selects the handling (see `AssetKind`). Every path
//! writes to a temp location first and only moves the finished result into
//! place, so a failure never leaves partial output at the destination. Temp
//! files and directories are `tempfile` guards and are removed on every
//! exit path.

mod error;
mod extract;
mod import;
mod kind;
mod layout;

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::NamedTempFile;

pub use error::{MaterializationError, MaterializationErrorKind};
pub use extract::extract_zip;
pub use import::{CommandImporter, NoImporter, PackageImporter, PATH_PLACEHOLDER};
pub use kind::{classify, normalize_extensions, strip_suffix_ignore_case, AssetKind, ZIP_EXTENSION};
pub use layout::{WorkspaceLayout, DOWNLOADS_DIR, TOOLBOX_DIR};

use crate::catalog::{asset_name_problem, AssetInfo};

/// Prefix for every temp artifact the materializer creates.
const TEMP_PREFIX: &str = ".qat-";

/// Mode for plain downloads; temp files start out owner-only.
#[cfg(unix)]
const PLAIN_FILE_MODE: u32 = 0o644;

/// Downloaded payload of one asset, consumed by `Materializer::materialize_download`.
#[derive(Debug, Clone)]
pub struct DownloadResult {
    pub asset: AssetInfo,
    pub bytes: Vec<u8>,
}

/// What was done with a downloaded asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterializeAction {
    Imported,
    Extracted,
    WrittenRaw,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializationOutcome {
    /// File written, directory extracted into, or (for packages) the project imported into.
    pub destination: PathBuf,
    pub action: MaterializeAction,
}

impl fmt::Display for MaterializationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.action {
            MaterializeAction::Imported => "imported package into",
            MaterializeAction::Extracted => "extracted to",
            MaterializeAction::WrittenRaw => "saved to",
        };
        write!(f, "{} {}", verb, self.destination.display())
    }
}

pub struct Materializer {
    layout: WorkspaceLayout,
    temp_dir: PathBuf,
    package_extensions: Vec<String>,
    importer: Arc<dyn PackageImporter>,
}

impl Materializer {
    /// Materializer with the system temp dir and the default package extension.
    pub fn new(layout: WorkspaceLayout, importer: Arc<dyn PackageImporter>) -> Self {
        Self {
            layout,
            temp_dir: std::env::temp_dir(),
            package_extensions: vec![".unitypackage".to_string()],
            importer,
        }
    }

    /// Stage archives and packages in `dir` instead of the system temp dir.
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = dir.into();
        self
    }

    pub fn with_package_extensions<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.package_extensions = normalize_extensions(exts);
        self
    }

    pub fn layout(&self) -> &WorkspaceLayout {
        &self.layout
    }

    pub fn classify(&self, name: &str) -> AssetKind {
        classify(name, &self.package_extensions)
    }

    pub fn materialize_download(
        &self,
        download: DownloadResult,
    ) -> Result<MaterializationOutcome, MaterializationError> {
        self.materialize(&download.asset.name, &download.bytes)
    }

    /// Place `bytes` for the asset called `name`. Blocking file I/O; run it
    /// on a worker when called from async code.
    pub fn materialize(
        &self,
        name: &str,
        bytes: &[u8],
    ) -> Result<MaterializationOutcome, MaterializationError> {
        if let Some(problem) = asset_name_problem(name) {
            return Err(MaterializationError::invalid_name(name, problem));
        }

        let outcome = match self.classify(name) {
            AssetKind::PackageArchive => self.import_package(name, bytes)?,
            AssetKind::ZipArchive => self.extract_archive(name, bytes)?,
            AssetKind::PlainFile => self.write_plain(name, bytes)?,
        };
        tracing::info!("asset {}: {}", name, outcome);
        Ok(outcome)
    }

    fn import_package(
        &self,
        name: &str,
        bytes: &[u8],
    ) -> Result<MaterializationOutcome, MaterializationError> {
        let suffix = self
            .package_extensions
            .iter()
            .find(|ext| strip_suffix_ignore_case(name, ext).is_some())
            .map(String::as_str)
            .unwrap_or_default();
        let staged = stage_bytes(&self.temp_dir, suffix, bytes)?;

        self.importer
            .import(staged.path())
            .map_err(|e| MaterializationError::import(name, &e))?;

        let staged_path = staged.path().to_path_buf();
        staged
            .close()
            .map_err(|e| MaterializationError::io("remove staged package", &staged_path, e))?;

        Ok(MaterializationOutcome {
            destination: self.layout.workspace().to_path_buf(),
            action: MaterializeAction::Imported,
        })
    }

    fn extract_archive(
        &self,
        name: &str,
        bytes: &[u8],
    ) -> Result<MaterializationOutcome, MaterializationError> {
        let stem = strip_suffix_ignore_case(name, ZIP_EXTENSION).unwrap_or(name);
        if let Some(problem) = asset_name_problem(stem) {
            return Err(MaterializationError::invalid_name(name, problem));
        }
        if stem.eq_ignore_ascii_case(DOWNLOADS_DIR) {
            return Err(MaterializationError::invalid_name(
                name,
                "would extract over the plain download directory",
            ));
        }

        let root = self.layout.root();
        create_dir(root)?;
        let dest = self.layout.extract_dir(stem);
        if dest.exists() {
            return Err(MaterializationError::io(
                "extract into",
                &dest,
                std::io::Error::new(std::io::ErrorKind::AlreadyExists, "destination already exists"),
            ));
        }

        let archive = stage_bytes(&self.temp_dir, ZIP_EXTENSION, bytes)?;

        // Extract next to the destination so the final rename stays on one filesystem.
        let staging = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .tempdir_in(root)
            .map_err(|e| MaterializationError::io("create staging directory in", root, e))?;
        let files = extract_zip(archive.path(), staging.path())?;

        fs::rename(staging.path(), &dest)
            .map_err(|e| MaterializationError::io("move extracted files to", &dest, e))?;
        tracing::debug!("extracted {} files from {}", files, name);

        let archive_path = archive.path().to_path_buf();
        archive
            .close()
            .map_err(|e| MaterializationError::io("remove staged archive", &archive_path, e))?;

        Ok(MaterializationOutcome {
            destination: dest,
            action: MaterializeAction::Extracted,
        })
    }

    fn write_plain(
        &self,
        name: &str,
        bytes: &[u8],
    ) -> Result<MaterializationOutcome, MaterializationError> {
        let dir = self.layout.downloads_dir();
        create_dir(&dir)?;
        let dest = self.layout.plain_file_path(name);

        // Same directory as the destination, so persist is an atomic rename.
        let temp = write_temp(&dir, ".part", bytes)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(temp.path(), fs::Permissions::from_mode(PLAIN_FILE_MODE))
                .map_err(|e| MaterializationError::io("set permissions on", temp.path(), e))?;
        }
        temp.persist(&dest)
            .map_err(|e| MaterializationError::io("move download to", &dest, e.error))?;

        Ok(MaterializationOutcome {
            destination: dest,
            action: MaterializeAction::WrittenRaw,
        })
    }
}

fn create_dir(dir: &Path) -> Result<(), MaterializationError> {
    fs::create_dir_all(dir).map_err(|e| MaterializationError::io("create directory", dir, e))
}

/// Write `bytes` to a fresh temp file in `dir` (created if absent).
fn stage_bytes(dir: &Path, suffix: &str, bytes: &[u8]) -> Result<NamedTempFile, MaterializationError> {
    create_dir(dir)?;
    write_temp(dir, suffix, bytes)
}

fn write_temp(dir: &Path, suffix: &str, bytes: &[u8]) -> Result<NamedTempFile, MaterializationError> {
    let mut temp = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(suffix)
        .tempfile_in(dir)
        .map_err(|e| MaterializationError::io("create temp file in", dir, e))?;
    temp.write_all(bytes)
        .and_then(|()| temp.as_file().sync_all())
        .map_err(|e| MaterializationError::io("write", temp.path(), e))?;
    Ok(temp)
}
