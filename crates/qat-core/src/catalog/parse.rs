//! Parse the catalog feed: `{"assets":[{"name":..,"url":..}, ...]}`.

use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

use super::name::asset_name_problem;
use super::{AssetCatalog, AssetInfo};

/// The feed body did not have the expected shape.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed catalog payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct AssetListPayload {
    assets: Vec<AssetInfo>,
}

/// Parse a feed body into a catalog.
///
/// Entries with unusable names are dropped (logged). When a name appears
/// more than once, the last entry wins and keeps the position of that last
/// occurrence.
pub fn parse_catalog(raw: &[u8]) -> Result<AssetCatalog, ParseError> {
    let payload: AssetListPayload = serde_json::from_slice(raw)?;
    let total = payload.assets.len();

    let valid: Vec<AssetInfo> = payload
        .assets
        .into_iter()
        .filter(|asset| match asset_name_problem(&asset.name) {
            Some(problem) => {
                tracing::warn!("skipping catalog entry {:?}: {}", asset.name, problem);
                false
            }
            None => true,
        })
        .collect();

    let assets = last_wins(valid);
    if assets.len() != total {
        tracing::debug!(
            "catalog: kept {} of {} entries after validation and dedup",
            assets.len(),
            total
        );
    }
    Ok(AssetCatalog::from_assets(assets))
}

fn last_wins(assets: Vec<AssetInfo>) -> Vec<AssetInfo> {
    let mut last_index: HashMap<&str, usize> = HashMap::with_capacity(assets.len());
    for (i, asset) in assets.iter().enumerate() {
        last_index.insert(asset.name.as_str(), i);
    }
    let keep: Vec<bool> = assets
        .iter()
        .enumerate()
        .map(|(i, asset)| last_index.get(asset.name.as_str()) == Some(&i))
        .collect();

    assets
        .into_iter()
        .zip(keep)
        .filter_map(|(asset, keep)| {
            if !keep {
                tracing::debug!("catalog: duplicate {:?} superseded by a later entry", asset.name);
            }
            keep.then_some(asset)
        })
        .collect()
}
