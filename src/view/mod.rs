//! Render models
//!
//! Pure builders that turn the catalog plus the session observations into
//! what the side panel and the on-screen overlay display. Output depends
//! only on the inputs, so identical inputs give identical models.

pub mod icons;
pub mod overlay;
pub mod panel;

pub use icons::IconCache;
pub use overlay::{build_overlay_lines, OverlayLine, OverlayLines};
pub use panel::{
    build_panel_tree, build_panel_tree_with_names, CategoryBranch, ItemLeaf, PanelNode, PanelTree,
    Rgb, SubsetBranch,
};
