//! `qat upload <path>` – upload a file, then refresh the catalog.

use anyhow::Result;
use qat_core::sync::SyncOrchestrator;
use std::path::Path;

pub async fn run_upload(orch: &SyncOrchestrator, path: &Path) -> Result<()> {
    let report = orch.upload(path).await?;
    println!("Uploaded {}", report.file_name);
    match report.refresh {
        Ok(catalog) => println!("Catalog now lists {} assets.", catalog.len()),
        Err(e) => eprintln!("warning: catalog refresh after upload failed: {}", e),
    }
    Ok(())
}
