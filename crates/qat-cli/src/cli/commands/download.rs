//! `qat download <name>...` – refresh, then download assets concurrently.

use anyhow::{bail, Result};
use qat_core::sync::SyncOrchestrator;

pub async fn run_download(orch: &SyncOrchestrator, names: &[String]) -> Result<()> {
    orch.refresh().await?;

    let mut failed = 0usize;
    let mut tasks = Vec::with_capacity(names.len());
    for name in names {
        match orch.find_asset(name) {
            Some(asset) => {
                let orch = orch.clone();
                tasks.push((name.clone(), tokio::spawn(async move { orch.download(asset).await })));
            }
            None => {
                eprintln!("{}: not in catalog", name);
                failed += 1;
            }
        }
    }

    for (name, task) in tasks {
        match task.await {
            Ok(Ok(outcome)) => println!("{}: {}", name, outcome),
            Ok(Err(e)) => {
                eprintln!("{}: {}", name, e);
                failed += 1;
            }
            Err(e) => {
                eprintln!("{}: download task failed: {}", name, e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} downloads failed", failed, names.len());
    }
    Ok(())
}
