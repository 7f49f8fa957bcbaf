/// On-screen overlay lines
///
/// While the bank or inventory is open the overlay lists every item in it
/// that some storage category accepts. When nothing matches it shows the
/// single "active" indicator line instead of going blank.

use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::StorageCatalog;
use crate::host::ItemNameResolver;
use crate::types::ItemId;
use crate::utils::display_name_or_placeholder;

pub const ACTIVE_LABEL: &str = "POHStorage active";
pub const ACTIVE_VALUE: &str = "✓";

/// Overlay panel width in pixels
pub const OVERLAY_WIDTH: u32 = 250;
/// Overlay height per line in pixels
pub const OVERLAY_LINE_HEIGHT: u32 = 20;

/// Label/value pair rendered as one overlay row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlayLine {
    pub left: String,
    pub right: String,
}

impl OverlayLine {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self { left: left.into(), right: right.into() }
    }

    /// The `POHStorage active / ✓` indicator
    pub fn active_indicator() -> Self {
        Self::new(ACTIVE_LABEL, ACTIVE_VALUE)
    }
}

/// Lines currently shown by the overlay; no lines means nothing is drawn
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OverlayLines(Vec<OverlayLine>);

impl OverlayLines {
    /// Just the active indicator
    pub fn active() -> Self {
        Self(vec![OverlayLine::active_indicator()])
    }

    pub fn cleared() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[OverlayLine] {
        &self.0
    }

    pub fn is_visible(&self) -> bool {
        !self.0.is_empty()
    }

    /// Panel size for the current lines as `(width, height)`
    pub fn preferred_size(&self) -> (u32, u32) {
        (OVERLAY_WIDTH, overlay_height(self.0.len()))
    }
}

fn overlay_height(line_count: usize) -> u32 {
    u32::try_from(line_count)
        .unwrap_or(u32::MAX)
        .saturating_mul(OVERLAY_LINE_HEIGHT)
}

impl From<Vec<OverlayLine>> for OverlayLines {
    fn from(lines: Vec<OverlayLine>) -> Self {
        Self(lines)
    }
}

/// Build overlay lines for the open container's items, in slot order
pub fn build_overlay_lines(
    catalog: &StorageCatalog,
    active_container_item_ids: &[ItemId],
    names: &dyn ItemNameResolver,
) -> Vec<OverlayLine> {
    let mut lines = Vec::new();

    for &id in active_container_item_ids {
        if id <= 0 {
            continue;
        }

        let categories = catalog.categories_of(id);
        if categories.is_empty() {
            debug!("No POH storage for item ID {}", id);
            continue;
        }

        let name = display_name_or_placeholder(names.item_name(id).as_deref(), id);
        let matched = categories
            .iter()
            .map(|c| c.display_name())
            .collect::<Vec<_>>()
            .join(", ");
        info!(" → POH match: {} (ID {}) → {}", name, id, matched);
        lines.push(OverlayLine::new(name, matched));
    }

    if lines.is_empty() {
        debug!("No POH-storable items in the open container");
        lines.push(OverlayLine::active_indicator());
    }
    lines
}
