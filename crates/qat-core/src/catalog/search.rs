//! Case-insensitive name search over a catalog snapshot.

use super::{AssetCatalog, AssetInfo};

/// Assets whose name contains `query`, ignoring case, in catalog order.
/// An empty query matches everything.
pub fn search(catalog: &AssetCatalog, query: &str) -> Vec<AssetInfo> {
    let needle = query.to_lowercase();
    catalog
        .iter()
        .filter(|asset| asset.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
