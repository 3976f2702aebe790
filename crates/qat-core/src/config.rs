use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Catalog feed used when the config file does not override it.
pub const DEFAULT_FETCH_URL: &str = "https://quantumleapstudios.org/assets.php";
/// Upload endpoint used when the config file does not override it.
pub const DEFAULT_UPLOAD_URL: &str = "https://quantumleapstudios.org/upload.php";

/// Network limits for the transfer client (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferConfig {
    /// Whole-request timeout in seconds. Expiry is reported as a timeout error.
    pub timeout_secs: u64,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Maximum number of redirects followed per request.
    pub max_redirections: u32,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 15,
            max_redirections: 10,
        }
    }
}

impl TransferConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Global configuration loaded from `~/.config/qat/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QatConfig {
    /// `GET` endpoint returning `{"assets":[{"name":..,"url":..}]}`.
    pub fetch_url: String,
    /// `POST` endpoint accepting a multipart `file` field.
    pub upload_url: String,
    /// Project directory assets are materialized into (None = current directory).
    #[serde(default)]
    pub workspace_dir: Option<PathBuf>,
    /// Optional transfer limits; if missing, built-in defaults are used.
    #[serde(default)]
    pub transfer: Option<TransferConfig>,
    /// Asset name suffixes handed to the package importer instead of written to disk.
    #[serde(default = "default_package_extensions")]
    pub package_extensions: Vec<String>,
    /// External importer argv; `{path}` is replaced with the staged package path.
    #[serde(default)]
    pub import_command: Option<Vec<String>>,
}

fn default_package_extensions() -> Vec<String> {
    vec![".unitypackage".to_string()]
}

impl Default for QatConfig {
    fn default() -> Self {
        Self {
            fetch_url: DEFAULT_FETCH_URL.to_string(),
            upload_url: DEFAULT_UPLOAD_URL.to_string(),
            workspace_dir: None,
            transfer: None,
            package_extensions: default_package_extensions(),
            import_command: None,
        }
    }
}

impl QatConfig {
    /// Transfer limits with defaults applied.
    pub fn transfer_or_default(&self) -> TransferConfig {
        self.transfer.clone().unwrap_or_default()
    }

    /// Workspace directory, falling back to the process working directory.
    pub fn workspace_or_cwd(&self) -> Result<PathBuf> {
        match &self.workspace_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("qat")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<QatConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = QatConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: QatConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = QatConfig::default();
        assert_eq!(cfg.fetch_url, DEFAULT_FETCH_URL);
        assert_eq!(cfg.upload_url, DEFAULT_UPLOAD_URL);
        assert!(cfg.workspace_dir.is_none());
        assert_eq!(cfg.package_extensions, vec![".unitypackage".to_string()]);
        let t = cfg.transfer_or_default();
        assert_eq!(t.timeout(), Duration::from_secs(30));
        assert_eq!(t.connect_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = QatConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: QatConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.fetch_url, cfg.fetch_url);
        assert_eq!(parsed.upload_url, cfg.upload_url);
        assert_eq!(parsed.package_extensions, cfg.package_extensions);
    }

    #[test]
    fn config_toml_minimal_uses_defaults() {
        let toml = r#"
            fetch_url = "http://localhost:8080/assets.php"
            upload_url = "http://localhost:8080/upload.php"
        "#;
        let cfg: QatConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.fetch_url, "http://localhost:8080/assets.php");
        assert!(cfg.transfer.is_none());
        assert!(cfg.import_command.is_none());
        assert_eq!(cfg.package_extensions, vec![".unitypackage".to_string()]);
    }

    #[test]
    fn config_toml_transfer_and_importer() {
        let toml = r#"
            fetch_url = "http://a/assets.php"
            upload_url = "http://a/upload.php"
            workspace_dir = "/tmp/project"
            package_extensions = [".unitypackage", ".pkg"]
            import_command = ["unity-import", "--package", "{path}"]

            [transfer]
            timeout_secs = 5
            connect_timeout_secs = 2
            max_redirections = 3
        "#;
        let cfg: QatConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.workspace_dir, Some(PathBuf::from("/tmp/project")));
        assert_eq!(cfg.package_extensions.len(), 2);
        assert_eq!(cfg.import_command.as_ref().unwrap()[2], "{path}");
        let t = cfg.transfer_or_default();
        assert_eq!(t.timeout_secs, 5);
        assert_eq!(t.connect_timeout_secs, 2);
        assert_eq!(t.max_redirections, 3);
        assert_eq!(cfg.workspace_or_cwd().unwrap(), PathBuf::from("/tmp/project"));
    }
}
