use std::collections::HashMap;
use tracing::debug;

use super::panel::PanelNode;
use crate::catalog::StorageCatalog;
use crate::host::ItemIconSource;
use crate::types::{ItemId, StorageCategory};

/// Panel icons, fetched once per item and per category header
#[derive(Debug, Clone)]
pub struct IconCache<I> {
    size: u32,
    items: HashMap<ItemId, I>,
    categories: HashMap<StorageCategory, I>,
}

impl<I: Clone> IconCache<I> {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            items: HashMap::new(),
            categories: HashMap::new(),
        }
    }

    /// Fetch every catalog item icon and every category header icon not
    /// already cached. Ids the source cannot render are skipped.
    pub fn preload<S>(&mut self, catalog: &StorageCatalog, source: &S)
    where
        S: ItemIconSource<Icon = I> + ?Sized,
    {
        for id in catalog.all_known_item_ids() {
            if id <= 0 || self.items.contains_key(&id) {
                continue;
            }
            if let Some(icon) = source.item_icon(id, self.size) {
                self.items.insert(id, icon);
            }
        }

        for category in StorageCategory::ALL {
            if self.categories.contains_key(&category) {
                continue;
            }
            let Some(id) = category.representative_item_id().filter(|id| *id > 0) else {
                continue;
            };
            if let Some(icon) = source.item_icon(id, self.size) {
                self.categories.insert(category, icon);
            }
        }

        debug!(
            "Icon cache holds {} item and {} category icon(s)",
            self.items.len(),
            self.categories.len()
        );
    }

    pub fn item_icon(&self, item_id: ItemId) -> Option<&I> {
        self.items.get(&item_id)
    }

    pub fn category_icon(&self, category: StorageCategory) -> Option<&I> {
        self.categories.get(&category)
    }

    /// Icon for a panel row; set rows have none
    pub fn icon_for(&self, node: &PanelNode<'_>) -> Option<&I> {
        match node {
            PanelNode::Category(branch) => self.category_icon(branch.category),
            PanelNode::Subset(_) => None,
            PanelNode::Item(leaf) => self.item_icon(leaf.id),
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.categories.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len() + self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.categories.is_empty()
    }
}
