use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use crate::types::{ItemId, Status, StorageCategory};

/// Observations made during the current login session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Items seen inside the housing-storage interface
    pub stored_in_housing: HashSet<ItemId>,
    /// Items seen in the bank or the inventory
    pub present_in_bank_or_inventory: HashSet<ItemId>,
}

impl SessionSnapshot {
    /// Stored wins over Missing; anything unobserved is Unknown
    pub fn status_of(&self, item_id: ItemId) -> Status {
        if self.stored_in_housing.contains(&item_id) {
            Status::Stored
        } else if self.present_in_bank_or_inventory.contains(&item_id) {
            Status::Missing
        } else {
            Status::Unknown
        }
    }
}

/// Shared handle to the session observations.
///
/// Every refresh replaces a whole set under a single write lock, so a reader
/// holding the read guard never sees a half-rebuilt set.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<SessionSnapshot>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild `stored_in_housing` from the per-category widget contents.
    ///
    /// `read_widget_items` returns `None` when a category's widget is not
    /// loaded; that category simply contributes nothing.
    pub fn refresh_housing_storage<F>(&self, mut read_widget_items: F)
    where
        F: FnMut(StorageCategory) -> Option<Vec<ItemId>>,
    {
        let mut stored = HashSet::new();
        for category in StorageCategory::ALL {
            match read_widget_items(category) {
                Some(ids) => stored.extend(ids.into_iter().filter(|id| *id > 0)),
                None => debug!("Storage widget for {} not loaded", category),
            }
        }

        debug!("Housing storage refreshed: {} item(s)", stored.len());
        self.inner.write().stored_in_housing = stored;
    }

    /// Rebuild `present_in_bank_or_inventory` from both containers.
    /// Empty slots (ids <= 0) are ignored.
    pub fn refresh_bank_and_inventory(&self, bank_items: &[ItemId], inventory_items: &[ItemId]) {
        let present: HashSet<ItemId> = bank_items
            .iter()
            .chain(inventory_items)
            .copied()
            .filter(|id| *id > 0)
            .collect();

        debug!("Bank and inventory refreshed: {} item(s)", present.len());
        self.inner.write().present_in_bank_or_inventory = present;
    }

    /// Forget every observation (logout, world hop, lost connection)
    pub fn reset_all(&self) {
        let mut state = self.inner.write();
        state.stored_in_housing.clear();
        state.present_in_bank_or_inventory.clear();
    }

    pub fn status_of(&self, item_id: ItemId) -> Status {
        self.inner.read().status_of(item_id)
    }

    pub fn is_stored(&self, item_id: ItemId) -> bool {
        self.inner.read().stored_in_housing.contains(&item_id)
    }

    pub fn is_in_bank_or_inventory(&self, item_id: ItemId) -> bool {
        self.inner.read().present_in_bank_or_inventory.contains(&item_id)
    }

    /// Run `f` against a consistent view of both sets
    pub fn with_snapshot<R>(&self, f: impl FnOnce(&SessionSnapshot) -> R) -> R {
        f(&self.inner.read())
    }

    /// Owned copy of the current observations
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.read().clone()
    }
}
