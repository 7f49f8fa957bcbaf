/// Scripted in-memory host
///
/// Stands in for the game client: containers, widgets and item
/// names are set explicitly, either from code or from JSON script lines.
/// The headless replay binary drives the event handler through it.

use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

use super::{
    ContainerId, ContainerSlot, ItemContainerSource, ItemIconSource, ItemNameResolver, WidgetGroupId,
    WidgetTree,
};
use crate::handlers::HostEvent;
use crate::types::ItemId;

/// One line of a replay script
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptCommand {
    /// Replace a container's contents; item ids are given in slot order
    SetContainer {
        container_id: ContainerId,
        items: Vec<ItemId>,
    },
    /// Replace the items shown by widget `group_id:child_id`; `null`
    /// unloads the widget
    SetWidget {
        group_id: WidgetGroupId,
        child_id: u16,
        items: Option<Vec<ItemId>>,
    },
    SetName {
        item_id: ItemId,
        name: String,
    },
    /// Deliver an event to the handler
    Event { event: HostEvent },
}

/// Icon handle handed out by the scripted host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptedIcon {
    pub item_id: ItemId,
    pub size: u32,
}

#[derive(Debug, Clone, Default)]
pub struct ScriptedHost {
    containers: HashMap<ContainerId, Vec<ContainerSlot>>,
    widgets: HashMap<(WidgetGroupId, u16), Vec<ItemId>>,
    names: HashMap<ItemId, String>,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_container(&mut self, container_id: ContainerId, items: &[ItemId]) {
        let slots = items
            .iter()
            .enumerate()
            .map(|(slot, item_id)| ContainerSlot { item_id: *item_id, slot })
            .collect();
        self.containers.insert(container_id, slots);
    }

    pub fn set_widget(&mut self, group_id: WidgetGroupId, child_id: u16, items: Option<Vec<ItemId>>) {
        match items {
            Some(items) => {
                self.widgets.insert((group_id, child_id), items);
            }
            None => {
                self.widgets.remove(&(group_id, child_id));
            }
        }
    }

    pub fn set_name(&mut self, item_id: ItemId, name: impl Into<String>) {
        self.names.insert(item_id, name.into());
    }

    /// Apply a state-changing command; events are returned for the caller
    /// to dispatch
    pub fn apply(&mut self, command: ScriptCommand) -> Option<HostEvent> {
        match command {
            ScriptCommand::SetContainer { container_id, items } => {
                debug!("Script: container {} now holds {} slot(s)", container_id, items.len());
                self.set_container(container_id, &items);
                None
            }
            ScriptCommand::SetWidget { group_id, child_id, items } => {
                debug!("Script: widget {}:{} set to {:?}", group_id, child_id, items);
                self.set_widget(group_id, child_id, items);
                None
            }
            ScriptCommand::SetName { item_id, name } => {
                self.set_name(item_id, name);
                None
            }
            ScriptCommand::Event { event } => Some(event),
        }
    }
}

impl ItemContainerSource for ScriptedHost {
    fn container_items(&self, container_id: ContainerId) -> Option<Vec<ContainerSlot>> {
        self.containers.get(&container_id).cloned()
    }
}

impl WidgetTree for ScriptedHost {
    fn widget_item_ids(&self, group: WidgetGroupId, child: u16) -> Option<Vec<ItemId>> {
        self.widgets.get(&(group, child)).cloned()
    }
}

impl ItemNameResolver for ScriptedHost {
    fn item_name(&self, item_id: ItemId) -> Option<String> {
        self.names.get(&item_id).cloned()
    }
}

impl ItemIconSource for ScriptedHost {
    type Icon = ScriptedIcon;

    fn item_icon(&self, item_id: ItemId, size: u32) -> Option<ScriptedIcon> {
        (item_id > 0).then_some(ScriptedIcon { item_id, size })
    }
}
