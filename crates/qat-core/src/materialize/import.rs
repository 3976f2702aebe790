//! Package-import collaborator.
//!
//! The host environment owns package import; the materializer only stages
//! the package file, calls the importer, and observes the result.

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::Command;

/// Placeholder in `import_command` replaced with the staged package path.
pub const PATH_PLACEHOLDER: &str = "{path}";

/// Imports a staged package file into the host project. Called from a
/// blocking worker; the file is removed once this returns.
pub trait PackageImporter: Send + Sync {
    fn import(&self, package: &Path) -> Result<()>;
}

/// Runs an external command, e.g. `["unity", "-importPackage", "{path}"]`.
/// If no argument contains `{path}`, the path is appended.
#[derive(Debug, Clone)]
pub struct CommandImporter {
    argv: Vec<String>,
}

impl CommandImporter {
    /// None if `argv` is empty.
    pub fn new(argv: Vec<String>) -> Option<Self> {
        if argv.is_empty() {
            None
        } else {
            Some(Self { argv })
        }
    }

    fn command_for(&self, package: &Path) -> Command {
        let package = package.to_string_lossy();
        let mut args: Vec<String> = self
            .argv
            .iter()
            .map(|a| a.replace(PATH_PLACEHOLDER, &package))
            .collect();
        if !self.argv.iter().any(|a| a.contains(PATH_PLACEHOLDER)) {
            args.push(package.into_owned());
        }
        let mut cmd = Command::new(&args[0]);
        cmd.args(&args[1..]);
        cmd
    }
}

impl PackageImporter for CommandImporter {
    fn import(&self, package: &Path) -> Result<()> {
        let mut cmd = self.command_for(package);
        tracing::debug!("running package importer: {:?}", cmd);
        let output = cmd
            .output()
            .with_context(|| format!("failed to start importer {:?}", self.argv[0]))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("importer exited with {}: {}", output.status, stderr.trim());
        }
        Ok(())
    }
}

/// Used when no importer is configured: every package import fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImporter;

impl PackageImporter for NoImporter {
    fn import(&self, package: &Path) -> Result<()> {
        bail!(
            "no package importer configured for {} (set import_command in config.toml)",
            package.display()
        )
    }
}
