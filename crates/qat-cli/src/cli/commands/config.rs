//! `qat config` – show where settings live and what is in effect.

use anyhow::Result;
use qat_core::config::{self, QatConfig};
use qat_core::logging;
use qat_core::materialize::WorkspaceLayout;
use std::path::Path;

pub fn run_config(cfg: &QatConfig, workspace: &Path) -> Result<()> {
    let layout = WorkspaceLayout::new(workspace);
    let transfer = cfg.transfer_or_default();

    println!("config file:   {}", config::config_path()?.display());
    println!("log file:      {}", logging::log_file_path()?.display());
    println!("fetch url:     {}", cfg.fetch_url);
    println!("upload url:    {}", cfg.upload_url);
    println!("toolbox root:  {}", layout.root().display());
    println!("downloads:     {}", layout.downloads_dir().display());
    println!(
        "timeouts:      {}s total, {}s connect",
        transfer.timeout_secs, transfer.connect_timeout_secs
    );
    println!("packages:      {}", cfg.package_extensions.join(", "));
    match &cfg.import_command {
        Some(argv) => println!("importer:      {}", argv.join(" ")),
        None => println!("importer:      (none; package downloads will fail)"),
    }
    Ok(())
}
