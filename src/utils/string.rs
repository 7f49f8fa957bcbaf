/// String utility functions

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::ItemId;

static MARKUP_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?(col|br|u|str|shad|img)(=[^>]*)?>").expect("valid markup regex"));

/// Placeholder shown for an item whose name is missing or empty
pub fn placeholder_name(item_id: ItemId) -> String {
    format!("Unknown Item (ID {})", item_id)
}

/// Remove client text markup such as `<col=ff9040>` and `</col>`
pub fn strip_markup(text: &str) -> String {
    MARKUP_TAG.replace_all(text, "").to_string()
}

/// Clean a resolved name, falling back to the placeholder when nothing is left
pub fn display_name_or_placeholder(name: Option<&str>, item_id: ItemId) -> String {
    match name.map(|n| strip_markup(n).trim().to_string()) {
        Some(clean) if !clean.is_empty() => clean,
        _ => placeholder_name(item_id),
    }
}
