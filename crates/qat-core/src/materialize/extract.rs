//! Zip extraction into a directory.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use super::error::MaterializationError;

/// Extract every entry of the zip at `archive` into `dest` (which must exist).
///
/// Entries whose path would land outside `dest` (absolute or `..`) make the
/// whole archive count as corrupt rather than being skipped. Returns the
/// number of files written.
pub fn extract_zip(archive: &Path, dest: &Path) -> Result<usize, MaterializationError> {
    let file = File::open(archive).map_err(|e| MaterializationError::io("open archive", archive, e))?;
    let mut zip = zip::ZipArchive::new(file)
        .map_err(|e| MaterializationError::archive(format!("not a readable zip archive: {}", e)))?;

    let mut files = 0usize;
    for i in 0..zip.len() {
        let mut entry = zip
            .by_index(i)
            .map_err(|e| MaterializationError::archive(format!("reading entry {}: {}", i, e)))?;
        let relative = entry.enclosed_name().ok_or_else(|| {
            MaterializationError::archive(format!(
                "entry {:?} escapes the extraction directory",
                entry.name()
            ))
        })?;
        let outpath = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&outpath)
                .map_err(|e| MaterializationError::io("create directory", &outpath, e))?;
            continue;
        }

        if let Some(parent) = outpath.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| MaterializationError::io("create directory", parent, e))?;
        }
        // Decode errors of any kind mean a corrupt archive; only the write is IoFailure.
        let mut data = Vec::new();
        entry.read_to_end(&mut data).map_err(|e| {
            MaterializationError::archive(format!("entry {:?}: {}", entry.name(), e))
        })?;
        fs::write(&outpath, &data).map_err(|e| MaterializationError::io("write", &outpath, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                fs::set_permissions(&outpath, fs::Permissions::from_mode(mode & 0o777))
                    .map_err(|e| MaterializationError::io("set permissions on", &outpath, e))?;
            }
        }
        files += 1;
    }
    Ok(files)
}
