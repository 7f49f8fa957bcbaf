/// Event handler
///
/// Dispatch table from client notifications to session refreshes and
/// render-model rebuilds. Every effect recomputes from the client's current
/// state, so duplicate or reordered notifications settle on the same result.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use crate::catalog::StorageCatalog;
use crate::config::Config;
use crate::host::{ContainerId, ContainerSlot, ItemNameResolver, StorageHost, WidgetGroupId};
use crate::state::SessionStore;
use crate::types::{GameState, ItemId};
use crate::view::{build_overlay_lines, build_panel_tree_with_names, OverlayLines, PanelTree};

/// Notifications delivered by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostEvent {
    ContainerChanged { container_id: ContainerId },
    WidgetLoaded { group_id: WidgetGroupId },
    WidgetClosed { group_id: WidgetGroupId },
    GameStateChanged { state: GameState },
}

/// Client ids the handler reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedIds {
    pub bank_container: ContainerId,
    pub inventory_container: ContainerId,
    pub bank_widget_group: WidgetGroupId,
    pub storage_widget_group: WidgetGroupId,
}

impl From<&Config> for TrackedIds {
    fn from(config: &Config) -> Self {
        Self {
            bank_container: config.bank_container_id,
            inventory_container: config.inventory_container_id,
            bank_widget_group: config.bank_widget_group,
            storage_widget_group: config.storage_widget_group,
        }
    }
}

impl Default for TrackedIds {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// Render models to hand to the overlay and panel after an event.
/// `None` means that surface is unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderUpdate {
    pub overlay: Option<OverlayLines>,
    pub panel: Option<PanelTree>,
}

impl RenderUpdate {
    pub fn is_empty(&self) -> bool {
        self.overlay.is_none() && self.panel.is_none()
    }
}

/// Owns the overlay state and drives the session store from client events
pub struct StorageEventHandler {
    catalog: Arc<StorageCatalog>,
    session: SessionStore,
    ids: TrackedIds,
    overlay: OverlayLines,
}

impl StorageEventHandler {
    pub fn new(catalog: Arc<StorageCatalog>, session: SessionStore, ids: TrackedIds) -> Self {
        Self {
            catalog,
            session,
            ids,
            overlay: OverlayLines::cleared(),
        }
    }

    pub fn catalog(&self) -> &StorageCatalog {
        &self.catalog
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn overlay(&self) -> &OverlayLines {
        &self.overlay
    }

    /// Plugin start: show the active indicator and the initial panel
    pub fn start_up(&mut self, names: &dyn ItemNameResolver) -> RenderUpdate {
        info!("POH Storage started!");
        self.overlay = OverlayLines::active();
        RenderUpdate {
            overlay: Some(self.overlay.clone()),
            panel: Some(self.panel_tree(names)),
        }
    }

    /// Plugin stop: hide the overlay
    pub fn shut_down(&mut self) -> RenderUpdate {
        self.overlay = OverlayLines::cleared();
        info!("POH Storage stopped!");
        RenderUpdate {
            overlay: Some(self.overlay.clone()),
            panel: None,
        }
    }

    /// Panel tree for the current session
    pub fn panel_tree(&self, names: &dyn ItemNameResolver) -> PanelTree {
        self.session
            .with_snapshot(|session| build_panel_tree_with_names(&self.catalog, session, names))
    }

    pub fn handle<H: StorageHost>(&mut self, event: &HostEvent, host: &H) -> RenderUpdate {
        match *event {
            HostEvent::ContainerChanged { container_id } => self.on_container_changed(container_id, host),
            HostEvent::WidgetLoaded { group_id } => self.on_widget_loaded(group_id, host),
            HostEvent::WidgetClosed { group_id } => self.on_widget_closed(group_id),
            HostEvent::GameStateChanged { state } => self.on_game_state_changed(state, host),
        }
    }

    fn on_container_changed<H: StorageHost>(&mut self, container_id: ContainerId, host: &H) -> RenderUpdate {
        let is_bank = container_id == self.ids.bank_container;
        if !is_bank && container_id != self.ids.inventory_container {
            return RenderUpdate::default();
        }

        let bank = Self::container_item_ids(host, self.ids.bank_container);
        let inventory = Self::container_item_ids(host, self.ids.inventory_container);
        info!(
            "{} updated: processing items (bank {}, inventory {})",
            if is_bank { "Bank" } else { "Inventory" },
            bank.len(),
            inventory.len()
        );

        self.session.refresh_bank_and_inventory(&bank, &inventory);

        let active = if is_bank { &bank } else { &inventory };
        self.overlay = build_overlay_lines(&self.catalog, active, host).into();

        RenderUpdate {
            overlay: Some(self.overlay.clone()),
            panel: Some(self.panel_tree(host)),
        }
    }

    fn on_widget_loaded<H: StorageHost>(&mut self, group_id: WidgetGroupId, host: &H) -> RenderUpdate {
        if group_id != self.ids.storage_widget_group {
            return RenderUpdate::default();
        }

        info!("Housing storage interface loaded");
        self.session
            .refresh_housing_storage(|category| host.category_item_ids(category));

        RenderUpdate {
            overlay: None,
            panel: Some(self.panel_tree(host)),
        }
    }

    fn on_widget_closed(&mut self, group_id: WidgetGroupId) -> RenderUpdate {
        if group_id == self.ids.bank_widget_group {
            info!("Bank interface closed");
        } else if group_id == self.ids.storage_widget_group {
            info!("Housing storage interface closed");
        } else {
            return RenderUpdate::default();
        }

        self.overlay = OverlayLines::active();
        RenderUpdate {
            overlay: Some(self.overlay.clone()),
            panel: None,
        }
    }

    fn on_game_state_changed<H: StorageHost>(&mut self, state: GameState, host: &H) -> RenderUpdate {
        if !state.ends_session() {
            debug!("Ignoring game state {:?}", state);
            return RenderUpdate::default();
        }

        info!("Clearing POHStorage renderings due to logout or lobby ({:?})", state);
        self.session.reset_all();
        self.overlay = OverlayLines::cleared();

        RenderUpdate {
            overlay: Some(self.overlay.clone()),
            panel: Some(self.panel_tree(host)),
        }
    }

    fn container_item_ids<H: StorageHost>(host: &H, container_id: ContainerId) -> Vec<ItemId> {
        host.container_items(container_id)
            .map(|slots| ContainerSlot::item_ids(&slots))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{LayoutHost, ScriptedHost};
    use crate::types::{Status, StorageCategory};
    use crate::view::OverlayLine;
    use std::collections::{BTreeMap, HashSet};

    const BANK: ContainerId = 95;
    const INVENTORY: ContainerId = 93;
    const BANK_UI: WidgetGroupId = 12;
    const STORAGE_UI: WidgetGroupId = 675;

    const SAMPLE: &str = r#"{
        "ARMOUR_CASE": [ { "set_name": "Rune", "items": [ { "id": 12, "name": "Rune platebody" } ] } ],
        "CAPE_RACK": [ { "set_name": "Capes", "items": [ { "id": 6570, "name": "Fire cape" } ] } ],
        "TOY_BOX": [ { "set_name": "Toys", "items": [ { "id": 2520, "name": "Toy horsey" } ] } ]
    }"#;

    fn handler() -> StorageEventHandler {
        let catalog = Arc::new(StorageCatalog::from_json_str(SAMPLE).unwrap());
        StorageEventHandler::new(catalog, SessionStore::new(), TrackedIds::default())
    }

    fn layout() -> BTreeMap<StorageCategory, u16> {
        Config::default().storage_widget_children()
    }

    /// Fill the category's storage widget under the default layout
    fn set_stored(host: &mut ScriptedHost, category: StorageCategory, items: Vec<ItemId>) {
        host.set_widget(STORAGE_UI, layout()[&category], Some(items));
    }

    /// Dispatch the way the binary does, through the configured widget layout
    fn dispatch(handler: &mut StorageEventHandler, event: HostEvent, host: &ScriptedHost) -> RenderUpdate {
        let children = layout();
        handler.handle(&event, &LayoutHost::new(host, STORAGE_UI, &children))
    }

    fn status(update: &RenderUpdate, id: ItemId) -> Status {
        update
            .panel
            .as_ref()
            .and_then(|tree| tree.items().find(|leaf| leaf.id == id))
            .map(|leaf| leaf.status)
            .unwrap()
    }

    #[test]
    fn test_start_up_and_shut_down() {
        let mut handler = handler();
        assert!(!handler.overlay().is_visible());

        let update = handler.start_up(&ScriptedHost::new());
        assert_eq!(update.overlay, Some(OverlayLines::active()));
        assert_eq!(update.panel.as_ref().map(|t| t.count(Status::Unknown)), Some(3));

        let update = handler.shut_down();
        assert_eq!(update.overlay, Some(OverlayLines::cleared()));
        assert!(update.panel.is_none());
    }

    #[test]
    fn test_bank_change_refreshes_session_and_overlay() {
        let mut handler = handler();
        let mut host = ScriptedHost::new();
        host.set_container(BANK, &[12, -1, 44]);
        host.set_container(INVENTORY, &[2520]);
        host.set_name(12, "Rune platebody");

        let update = dispatch(&mut handler, HostEvent::ContainerChanged { container_id: BANK }, &host);

        assert_eq!(
            update.overlay.as_ref().map(|o| o.lines().to_vec()),
            Some(vec![OverlayLine::new("Rune platebody", "ARMOUR CASE")])
        );
        assert_eq!(status(&update, 12), Status::Missing);
        assert_eq!(status(&update, 2520), Status::Missing);
        assert_eq!(status(&update, 6570), Status::Unknown);
    }

    #[test]
    fn test_inventory_change_uses_inventory_for_overlay() {
        let mut handler = handler();
        let mut host = ScriptedHost::new();
        host.set_container(BANK, &[12]);
        host.set_container(INVENTORY, &[2520]);
        host.set_name(2520, "Toy horsey");

        let update = dispatch(&mut handler, HostEvent::ContainerChanged { container_id: INVENTORY }, &host);
        assert_eq!(
            update.overlay.map(|o| o.lines().to_vec()),
            Some(vec![OverlayLine::new("Toy horsey", "TOY BOX")])
        );
        assert!(handler.session().is_in_bank_or_inventory(12));
    }

    #[test]
    fn test_untracked_container_is_ignored() {
        let mut handler = handler();
        let mut host = ScriptedHost::new();
        host.set_container(BANK, &[12]);

        let update = dispatch(&mut handler, HostEvent::ContainerChanged { container_id: 94 }, &host);
        assert!(update.is_empty());
        assert!(!handler.session().is_in_bank_or_inventory(12));
    }

    #[test]
    fn test_unloaded_containers_count_as_empty() {
        let mut handler = handler();
        let update = dispatch(
            &mut handler,
            HostEvent::ContainerChanged { container_id: BANK },
            &ScriptedHost::new(),
        );
        assert_eq!(update.overlay, Some(OverlayLines::active()));
        assert_eq!(handler.session().snapshot().present_in_bank_or_inventory.len(), 0);
    }

    #[test]
    fn test_storage_interface_marks_items_stored() {
        let mut handler = handler();
        let mut host = ScriptedHost::new();
        host.set_container(BANK, &[6570, 12]);
        set_stored(&mut host, StorageCategory::CapeRack, vec![6570]);
        dispatch(&mut handler, HostEvent::ContainerChanged { container_id: BANK }, &host);

        let update = dispatch(&mut handler, HostEvent::WidgetLoaded { group_id: STORAGE_UI }, &host);
        assert!(update.overlay.is_none());
        assert_eq!(status(&update, 6570), Status::Stored);
        assert_eq!(status(&update, 12), Status::Missing);
        assert_eq!(status(&update, 2520), Status::Unknown);
    }

    #[test]
    fn test_remapped_widget_child_changes_stored_items() {
        let mut handler = handler();
        let mut host = ScriptedHost::new();
        host.set_widget(STORAGE_UI, 7, Some(vec![6570]));
        host.set_widget(STORAGE_UI, 20, Some(vec![2520]));

        // default layout: cape rack is child 7, toy box child 5
        dispatch(&mut handler, HostEvent::WidgetLoaded { group_id: STORAGE_UI }, &host);
        assert!(handler.session().is_stored(6570));
        assert!(!handler.session().is_stored(2520));

        let config: Config = toml::from_str(
            r#"
            [storage_widgets]
            TOY_BOX = 20
            "#,
        )
        .unwrap();
        let children = config.storage_widget_children();
        let remapped = LayoutHost::from_config(&host, &config, &children);
        handler.handle(&HostEvent::WidgetLoaded { group_id: STORAGE_UI }, &remapped);

        assert_eq!(handler.session().snapshot().stored_in_housing, HashSet::from([2520]));
    }

    #[test]
    fn test_other_widget_groups_are_ignored() {
        let mut handler = handler();
        let mut host = ScriptedHost::new();
        set_stored(&mut host, StorageCategory::CapeRack, vec![6570]);

        assert!(dispatch(&mut handler, HostEvent::WidgetLoaded { group_id: BANK_UI }, &host).is_empty());
        assert!(dispatch(&mut handler, HostEvent::WidgetClosed { group_id: 149 }, &host).is_empty());
        assert!(!handler.session().is_stored(6570));
    }

    #[test]
    fn test_closing_interfaces_resets_only_the_overlay() {
        let mut handler = handler();
        let mut host = ScriptedHost::new();
        host.set_container(BANK, &[12]);
        set_stored(&mut host, StorageCategory::CapeRack, vec![6570]);
        dispatch(&mut handler, HostEvent::ContainerChanged { container_id: BANK }, &host);
        dispatch(&mut handler, HostEvent::WidgetLoaded { group_id: STORAGE_UI }, &host);

        for group_id in [BANK_UI, STORAGE_UI] {
            let update = dispatch(&mut handler, HostEvent::WidgetClosed { group_id }, &host);
            assert_eq!(update.overlay, Some(OverlayLines::active()));
            assert!(update.panel.is_none());
        }
        assert!(handler.session().is_in_bank_or_inventory(12));
        assert!(handler.session().is_stored(6570));
    }

    #[test]
    fn test_logout_resets_everything() {
        let mut handler = handler();
        let mut host = ScriptedHost::new();
        host.set_container(BANK, &[12, 6570]);
        set_stored(&mut host, StorageCategory::CapeRack, vec![6570]);
        dispatch(&mut handler, HostEvent::ContainerChanged { container_id: BANK }, &host);
        dispatch(&mut handler, HostEvent::WidgetLoaded { group_id: STORAGE_UI }, &host);

        let update = dispatch(
            &mut handler,
            HostEvent::GameStateChanged { state: GameState::LoginScreen },
            &host,
        );
        assert_eq!(update.overlay, Some(OverlayLines::cleared()));
        let tree = update.panel.unwrap();
        assert_eq!(tree.count(Status::Unknown), 3);
        assert_eq!(
            build_overlay_lines(handler.catalog(), &[], &host),
            vec![OverlayLine::active_indicator()]
        );
    }

    #[test]
    fn test_logged_in_state_is_ignored() {
        let mut handler = handler();
        let mut host = ScriptedHost::new();
        host.set_container(BANK, &[12]);
        dispatch(&mut handler, HostEvent::ContainerChanged { container_id: BANK }, &host);

        let update = dispatch(&mut handler, HostEvent::GameStateChanged { state: GameState::LoggedIn }, &host);
        assert!(update.is_empty());
        assert!(handler.session().is_in_bank_or_inventory(12));
    }

    #[test]
    fn test_duplicate_events_are_idempotent() {
        let mut handler = handler();
        let mut host = ScriptedHost::new();
        host.set_container(BANK, &[12, 2520]);
        set_stored(&mut host, StorageCategory::ToyBox, vec![2520]);

        let events = [
            HostEvent::ContainerChanged { container_id: BANK },
            HostEvent::WidgetLoaded { group_id: STORAGE_UI },
            HostEvent::WidgetClosed { group_id: BANK_UI },
            HostEvent::GameStateChanged { state: GameState::Hopping },
        ];
        for event in &events {
            let first = dispatch(&mut handler, *event, &host);
            let session = handler.session().snapshot();
            let overlay = handler.overlay().clone();

            let second = dispatch(&mut handler, *event, &host);
            assert_eq!(first, second);
            assert_eq!(handler.session().snapshot(), session);
            assert_eq!(handler.overlay(), &overlay);
        }
    }

    #[test]
    fn test_event_json_shape() {
        let event: HostEvent =
            serde_json::from_str(r#"{"kind":"widget_closed","group_id":12}"#).unwrap();
        assert_eq!(event, HostEvent::WidgetClosed { group_id: 12 });
        let json = serde_json::to_string(&HostEvent::ContainerChanged { container_id: 95 }).unwrap();
        assert_eq!(json, r#"{"kind":"container_changed","container_id":95}"#);
    }
}
