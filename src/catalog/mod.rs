//! Storage catalog
//!
//! Static table of every item that can be placed in player-owned-house
//! storage, grouped by category and named set, plus a reverse index from
//! item id to the categories that accept it. Built once at startup and
//! read-only afterwards.

pub mod loader;

pub use loader::{CatalogLoadError, BUNDLED_CATALOG};

use std::collections::{BTreeSet, HashMap};

use crate::types::{ItemId, StorageCategory};

/// One storable item as listed in the data file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: ItemId,
    /// Name from the data file, or the `Unknown Item (ID ..)` placeholder
    pub name: String,
    /// False when `name` is the placeholder and should be resolved by id
    pub has_source_name: bool,
}

/// Named set of items within a category, in data-file order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subset {
    pub name: String,
    pub entries: Vec<CatalogEntry>,
}

/// Read-only lookup table built from the storable items document
#[derive(Debug, Clone, Default)]
pub struct StorageCatalog {
    by_category: HashMap<StorageCategory, Vec<Subset>>,
    categories_by_item: HashMap<ItemId, BTreeSet<StorageCategory>>,
}

impl StorageCatalog {
    /// Catalog with no categories and no reverse index.
    ///
    /// This is the only state a failed load can leave behind.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Subsets of `category` in load order; empty when the category has none
    pub fn subsets_of(&self, category: StorageCategory) -> &[Subset] {
        self.by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Look up one subset of a category by name
    pub fn subset(&self, category: StorageCategory, name: &str) -> Option<&Subset> {
        self.subsets_of(category).iter().find(|s| s.name == name)
    }

    /// Categories accepting `item_id`, in enumeration order; empty when unknown
    pub fn categories_of(&self, item_id: ItemId) -> BTreeSet<StorageCategory> {
        self.categories_by_item
            .get(&item_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Every item id that appears anywhere in the catalog
    pub fn all_known_item_ids(&self) -> BTreeSet<ItemId> {
        self.categories_by_item.keys().copied().collect()
    }

    pub fn contains(&self, item_id: ItemId) -> bool {
        self.categories_by_item.contains_key(&item_id)
    }

    /// Number of unique item ids
    pub fn len(&self) -> usize {
        self.categories_by_item.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty() && self.categories_by_item.is_empty()
    }

    /// All entries with their category and set name, categories in
    /// enumeration order and sets/entries in load order
    pub fn entries(&self) -> impl Iterator<Item = (StorageCategory, &str, &CatalogEntry)> + '_ {
        StorageCategory::ALL.into_iter().flat_map(move |category| {
            self.subsets_of(category).iter().flat_map(move |subset| {
                subset
                    .entries
                    .iter()
                    .map(move |entry| (category, subset.name.as_str(), entry))
            })
        })
    }
}
