//! `qat list [query]` – refresh the catalog and print the filtered view.

use anyhow::Result;
use qat_core::sync::SyncOrchestrator;

pub async fn run_list(orch: &SyncOrchestrator, query: Option<&str>) -> Result<()> {
    orch.set_search_query(query.unwrap_or_default());
    orch.refresh().await?;

    let view = orch.current_filtered_view();
    if view.is_empty() {
        match query {
            Some(q) => println!("No assets match {:?}.", q),
            None => println!("The catalog is empty."),
        }
        return Ok(());
    }

    let width = view
        .iter()
        .map(|a| a.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("NAME".len());
    println!("{:<width$}  {}", "NAME", "URL", width = width);
    for asset in &view {
        println!("{:<width$}  {}", asset.name, asset.url, width = width);
    }
    println!("{} of {} assets", view.len(), orch.catalog().len());
    Ok(())
}
