//! POH Storage
//!
//! Tracks which owned items can be placed in player-owned-house storage and
//! classifies each one as stored, missing or unknown. A static catalog maps
//! item ids to storage categories; client events keep the session
//! observations current; the view builders turn both into a side-panel tree
//! and overlay lines for the client to draw.

pub mod catalog;
pub mod config;
pub mod handlers;
pub mod host;
pub mod logging;
pub mod state;
pub mod types;
pub mod utils;
pub mod view;

pub use catalog::{CatalogEntry, CatalogLoadError, StorageCatalog, Subset};
pub use handlers::{HostEvent, RenderUpdate, StorageEventHandler, TrackedIds};
pub use state::{SessionSnapshot, SessionStore};
pub use types::{GameState, ItemId, Status, StorageCategory};
pub use view::{OverlayLine, OverlayLines, PanelNode, PanelTree};
