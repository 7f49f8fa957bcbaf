/// Widget layout adapter
///
/// Maps each storage category onto a child widget of the housing-storage
/// interface group. The child ids are client-specific, so they come from
/// configuration rather than from the core.

use std::collections::BTreeMap;
use tracing::debug;

use super::{
    ContainerId, ContainerSlot, ItemContainerSource, ItemNameResolver, StorageWidgetSource,
    WidgetGroupId,
};
use crate::config::Config;
use crate::types::{ItemId, StorageCategory};

/// Raw client widget tree access
pub trait WidgetTree {
    /// Item ids held by the children of widget `group:child`, `None` when
    /// that widget is not loaded
    fn widget_item_ids(&self, group: WidgetGroupId, child: u16) -> Option<Vec<ItemId>>;
}

/// Reads per-category storage contents through a configured layout
pub struct WidgetLayoutReader<'a, W: ?Sized> {
    tree: &'a W,
    group: WidgetGroupId,
    children: &'a BTreeMap<StorageCategory, u16>,
}

impl<'a, W: WidgetTree + ?Sized> WidgetLayoutReader<'a, W> {
    pub fn new(tree: &'a W, group: WidgetGroupId, children: &'a BTreeMap<StorageCategory, u16>) -> Self {
        Self { tree, group, children }
    }
}

impl<W: WidgetTree + ?Sized> StorageWidgetSource for WidgetLayoutReader<'_, W> {
    fn category_item_ids(&self, category: StorageCategory) -> Option<Vec<ItemId>> {
        let Some(child) = self.children.get(&category) else {
            debug!("No widget mapping configured for {}", category);
            return None;
        };
        self.tree.widget_item_ids(self.group, *child)
    }
}

/// Client view handed to the event handler: containers and names come
/// straight from the client, storage contents go through the widget layout
pub struct LayoutHost<'a, H: ?Sized> {
    client: &'a H,
    group: WidgetGroupId,
    children: &'a BTreeMap<StorageCategory, u16>,
}

impl<'a, H: ?Sized> LayoutHost<'a, H> {
    pub fn new(client: &'a H, group: WidgetGroupId, children: &'a BTreeMap<StorageCategory, u16>) -> Self {
        Self { client, group, children }
    }

    /// Layout from `config`; `children` is usually `config.storage_widget_children()`
    pub fn from_config(client: &'a H, config: &Config, children: &'a BTreeMap<StorageCategory, u16>) -> Self {
        Self::new(client, config.storage_widget_group, children)
    }
}

impl<H: ItemContainerSource + ?Sized> ItemContainerSource for LayoutHost<'_, H> {
    fn container_items(&self, container_id: ContainerId) -> Option<Vec<ContainerSlot>> {
        self.client.container_items(container_id)
    }
}

impl<H: ItemNameResolver + ?Sized> ItemNameResolver for LayoutHost<'_, H> {
    fn item_name(&self, item_id: ItemId) -> Option<String> {
        self.client.item_name(item_id)
    }
}

impl<H: WidgetTree + ?Sized> StorageWidgetSource for LayoutHost<'_, H> {
    fn category_item_ids(&self, category: StorageCategory) -> Option<Vec<ItemId>> {
        WidgetLayoutReader::new(self.client, self.group, self.children).category_item_ids(category)
    }
}
