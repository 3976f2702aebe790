//! Logging init: file under XDG state dir, or graceful fallback to stderr.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "info,qat_core=debug,qat=debug";

/// Appends every event to one open log file; writers borrow the shared handle.
struct LogFile(fs::File);

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = &'a fs::File;

    fn make_writer(&'a self) -> Self::Writer {
        &self.0
    }
}

/// Initialize structured logging to `~/.local/state/qat/qat.log`.
/// Returns Err when the log file cannot be opened so the caller can use `init_logging_stderr`.
pub fn init_logging() -> Result<()> {
    let path = log_file_path()?;
    let file = open_log_file(&path)?;
    install(LogFile(file));
    tracing::info!("qat logging initialized at {}", path.display());
    Ok(())
}

/// Stderr-only logging for when the state directory is unusable.
pub fn init_logging_stderr() {
    install(io::stderr);
}

fn install<W>(writer: W)
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(default_env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .init();
}

fn open_log_file(path: &Path) -> io::Result<fs::File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::OpenOptions::new().create(true).append(true).open(path)
}

/// Location of the log file under the XDG state directory.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("qat")?;
    Ok(xdg_dirs.get_state_home().join("qat").join("qat.log"))
}

fn default_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
