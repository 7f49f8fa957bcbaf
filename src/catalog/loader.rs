/// Catalog loader
///
/// Parses the storable items document:
/// `{ "<CATEGORY>": [ { "set_name": "..", "items": [ { "id": 1, "name": ".." } ] } ] }`
///
/// A load either builds the whole catalog or fails; callers that must keep
/// running use the `*_or_empty` variants, which log and fall back to an
/// empty catalog.

use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::{CatalogEntry, StorageCatalog, Subset};
use crate::types::{ItemId, StorageCategory};
use crate::utils::placeholder_name;

/// Storable items table shipped with the crate
pub const BUNDLED_CATALOG: &str = include_str!("../../resources/storable_items.json");

/// Errors from loading the catalog document
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid catalog shape: {0}")]
    InvalidShape(String),

    #[error("Invalid item id {id} in {category} / {set_name}")]
    InvalidItemId {
        category: StorageCategory,
        set_name: String,
        id: i64,
    },
}

#[derive(Debug, Deserialize)]
struct RawSubset {
    set_name: String,
    items: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    id: i64,
    #[serde(default)]
    name: Option<String>,
}

impl StorageCatalog {
    /// Parse a catalog document
    pub fn from_json_str(source: &str) -> Result<Self, CatalogLoadError> {
        let document: serde_json::Value = serde_json::from_str(source)?;
        let top = document.as_object().ok_or_else(|| {
            CatalogLoadError::InvalidShape("top level must be an object keyed by category".to_string())
        })?;

        let mut by_category: HashMap<StorageCategory, Vec<Subset>> = HashMap::new();
        let mut categories_by_item: HashMap<ItemId, BTreeSet<StorageCategory>> = HashMap::new();

        for (key, value) in top {
            let Some(category) = StorageCategory::from_tag(key) else {
                warn!("Unknown storage type in catalog: {}", key);
                continue;
            };

            let raw_subsets: Vec<RawSubset> = serde_json::from_value(value.clone())
                .map_err(|e| CatalogLoadError::InvalidShape(format!("{}: {}", key, e)))?;

            let subsets = by_category.entry(category).or_default();
            for raw in raw_subsets {
                let mut entries = Vec::with_capacity(raw.items.len());
                for item in raw.items {
                    let id = ItemId::try_from(item.id)
                        .ok()
                        .filter(|id| *id >= 0)
                        .ok_or_else(|| CatalogLoadError::InvalidItemId {
                            category,
                            set_name: raw.set_name.clone(),
                            id: item.id,
                        })?;

                    let entry = match item.name.filter(|n| !n.is_empty()) {
                        Some(name) => CatalogEntry { id, name, has_source_name: true },
                        None => CatalogEntry {
                            id,
                            name: placeholder_name(id),
                            has_source_name: false,
                        },
                    };
                    categories_by_item.entry(id).or_default().insert(category);
                    entries.push(entry);
                }

                match subsets.iter_mut().find(|s| s.name == raw.set_name) {
                    Some(existing) => {
                        warn!(
                            "Duplicate set '{}' in {}, appending {} item(s)",
                            raw.set_name,
                            category,
                            entries.len()
                        );
                        existing.entries.extend(entries);
                    }
                    None => subsets.push(Subset { name: raw.set_name, entries }),
                }
            }
        }

        Ok(Self { by_category, categories_by_item })
    }

    /// Read and parse a catalog document from disk
    pub fn from_path(path: &Path) -> Result<Self, CatalogLoadError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Parse the bundled storable items table
    pub fn bundled() -> Result<Self, CatalogLoadError> {
        Self::from_json_str(BUNDLED_CATALOG)
    }

    /// Parse `source`, falling back to an empty catalog on any failure
    pub fn load_or_empty(source: &str) -> Self {
        Self::finish_load(Self::from_json_str(source), "document")
    }

    /// Load from `path` when given, otherwise the bundled table; never fails
    pub fn load_path_or_bundled(path: Option<&Path>) -> Self {
        match path {
            Some(path) => {
                let origin = path.display().to_string();
                Self::finish_load(Self::from_path(path), &origin)
            }
            None => Self::finish_load(Self::bundled(), "bundled storable_items.json"),
        }
    }

    fn finish_load(result: Result<Self, CatalogLoadError>, origin: &str) -> Self {
        match result {
            Ok(catalog) => {
                info!("Successfully loaded {}", origin);
                info!("Loaded {} total unique item IDs", catalog.len());
                debug!("Item ID list: {:?}", catalog.all_known_item_ids());
                catalog
            }
            Err(e) => {
                error!("Failed to load {}: {}", origin, e);
                Self::empty()
            }
        }
    }
}
