//! Host capabilities
//!
//! The game client owns containers, widgets, item names and icons. The core
//! only reads them through these traits, so the client-facing adapter decides
//! which thread and which API actually answers each call.

pub mod scripted;
pub mod widgets;

pub use scripted::{ScriptCommand, ScriptedHost};
pub use widgets::{LayoutHost, WidgetLayoutReader, WidgetTree};

use crate::types::{ItemId, StorageCategory};

/// Client item container id (bank, inventory, ...)
pub type ContainerId = u32;

/// Client interface group id
pub type WidgetGroupId = u16;

/// One slot of an item container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerSlot {
    pub item_id: ItemId,
    pub slot: usize,
}

impl ContainerSlot {
    /// Item ids of `slots` in slot order
    pub fn item_ids(slots: &[ContainerSlot]) -> Vec<ItemId> {
        let mut ordered = slots.to_vec();
        ordered.sort_by_key(|s| s.slot);
        ordered.into_iter().map(|s| s.item_id).collect()
    }
}

/// Current contents of client item containers
pub trait ItemContainerSource {
    /// `None` when the client has not loaded the container yet
    fn container_items(&self, container_id: ContainerId) -> Option<Vec<ContainerSlot>>;
}

/// Item ids shown by the housing-storage interface, per category
pub trait StorageWidgetSource {
    /// `None` when the category's widget cannot be resolved right now
    fn category_item_ids(&self, category: StorageCategory) -> Option<Vec<ItemId>>;
}

/// Item name lookup
pub trait ItemNameResolver {
    /// `None` or an empty string when the client has no name for the id
    fn item_name(&self, item_id: ItemId) -> Option<String>;
}

/// Item icon lookup, used only by the panel adapter
pub trait ItemIconSource {
    type Icon: Clone;

    fn item_icon(&self, item_id: ItemId, size: u32) -> Option<Self::Icon>;
}

/// Everything the event handler reads from the client
pub trait StorageHost: ItemContainerSource + StorageWidgetSource + ItemNameResolver {}

impl<T> StorageHost for T where T: ItemContainerSource + StorageWidgetSource + ItemNameResolver {}

/// Resolver that knows no names; every lookup falls back to the placeholder
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNames;

impl ItemNameResolver for NoNames {
    fn item_name(&self, _item_id: ItemId) -> Option<String> {
        None
    }
}
