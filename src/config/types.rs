use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::warn;

use crate::host::{ContainerId, WidgetGroupId};
use crate::types::StorageCategory;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Storable items document to load instead of the bundled one
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    #[serde(default = "default_bank_container_id")]
    pub bank_container_id: ContainerId,

    #[serde(default = "default_inventory_container_id")]
    pub inventory_container_id: ContainerId,

    #[serde(default = "default_bank_widget_group")]
    pub bank_widget_group: WidgetGroupId,

    #[serde(default = "default_storage_widget_group")]
    pub storage_widget_group: WidgetGroupId,

    #[serde(default = "default_icon_size")]
    pub icon_size: u32,

    /// Child widget id of each category inside the storage interface,
    /// keyed by category tag (`ARMOUR_CASE`, ...)
    #[serde(default = "default_storage_widgets")]
    pub storage_widgets: BTreeMap<String, u16>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_file_name")]
    pub file_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_name: default_log_file_name(),
        }
    }
}

// Default values
fn default_bank_container_id() -> ContainerId {
    95
}

fn default_inventory_container_id() -> ContainerId {
    93
}

fn default_bank_widget_group() -> WidgetGroupId {
    12
}

fn default_storage_widget_group() -> WidgetGroupId {
    675
}

fn default_icon_size() -> u32 {
    25
}

fn default_storage_widgets() -> BTreeMap<String, u16> {
    // Child ids of the costume room interface, one per storage furniture
    StorageCategory::ALL
        .iter()
        .zip(4u16..)
        .map(|(category, child)| (category.tag().to_string(), child))
        .collect()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file_name() -> String {
    "poh-storage.log".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            bank_container_id: default_bank_container_id(),
            inventory_container_id: default_inventory_container_id(),
            bank_widget_group: default_bank_widget_group(),
            storage_widget_group: default_storage_widget_group(),
            icon_size: default_icon_size(),
            storage_widgets: default_storage_widgets(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Widget child per category; entries with an unknown tag are dropped
    pub fn storage_widget_children(&self) -> BTreeMap<StorageCategory, u16> {
        self.storage_widgets
            .iter()
            .filter_map(|(tag, child)| match StorageCategory::from_tag(tag) {
                Some(category) => Some((category, *child)),
                None => {
                    warn!("Ignoring storage widget mapping for unknown category {}", tag);
                    None
                }
            })
            .collect()
    }
}
