//! Catalog repository: the last fetched list of remote assets.
//!
//! The catalog is an immutable snapshot behind an `Arc`. A refresh parses a
//! whole new snapshot and swaps it in under a write lock; readers clone the
//! `Arc` and never see a half-updated list. A failed parse leaves the
//! current snapshot untouched.

mod name;
mod parse;
mod search;

use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};

pub use name::{asset_name_problem, is_safe_asset_name};
pub use parse::{parse_catalog, ParseError};
pub use search::search;

/// One downloadable asset as listed by the feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetInfo {
    /// Filename the asset is saved under; its extension selects the handling.
    pub name: String,
    /// Absolute URL of the payload.
    pub url: String,
}

impl AssetInfo {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Ordered list of assets, unique by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetCatalog {
    assets: Vec<AssetInfo>,
}

impl AssetCatalog {
    /// Wrap an already validated list.
    pub fn from_assets(assets: Vec<AssetInfo>) -> Self {
        Self { assets }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AssetInfo> {
        self.assets.iter()
    }

    pub fn as_slice(&self) -> &[AssetInfo] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Asset with exactly this name.
    pub fn find(&self, name: &str) -> Option<&AssetInfo> {
        self.assets.iter().find(|a| a.name == name)
    }
}

impl<'a> IntoIterator for &'a AssetCatalog {
    type Item = &'a AssetInfo;
    type IntoIter = std::slice::Iter<'a, AssetInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Holds the current catalog snapshot. Single writer at a time; any number
/// of readers.
#[derive(Debug, Default)]
pub struct CatalogRepository {
    current: RwLock<Arc<AssetCatalog>>,
}

impl CatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `raw` and, only if it parses, replace the stored catalog.
    pub fn refresh(&self, raw: &[u8]) -> Result<Arc<AssetCatalog>, ParseError> {
        let catalog = Arc::new(parse_catalog(raw)?);
        self.replace(Arc::clone(&catalog));
        tracing::info!("catalog refreshed: {} assets", catalog.len());
        Ok(catalog)
    }

    /// Swap in a new snapshot wholesale.
    pub fn replace(&self, catalog: Arc<AssetCatalog>) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = catalog;
    }

    /// Current snapshot. Stays valid even if a refresh swaps in a new one.
    pub fn snapshot(&self) -> Arc<AssetCatalog> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Search the current snapshot; recomputed on every call.
    pub fn search(&self, query: &str) -> Vec<AssetInfo> {
        search(&self.snapshot(), query)
    }

    pub fn find(&self, name: &str) -> Option<AssetInfo> {
        self.snapshot().find(name).cloned()
    }
}
