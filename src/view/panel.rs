/// Side panel tree
///
/// Groups the catalog as category -> set -> item and tags each item with its
/// status against the session. Empty categories and empty sets are left out.

use serde::Serialize;

use crate::catalog::{CatalogEntry, StorageCatalog};
use crate::host::{ItemNameResolver, NoNames};
use crate::state::SessionSnapshot;
use crate::types::{ItemId, Status, StorageCategory};
use crate::utils::display_name_or_placeholder;

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    /// Category headers
    pub const HEADER_BLUE: Rgb = Rgb(52, 152, 219);
    /// Set names
    pub const SET_YELLOW: Rgb = Rgb(241, 196, 15);
}

impl Status {
    pub fn color(&self) -> Rgb {
        match self {
            Status::Unknown => Rgb::WHITE,
            Status::Missing => Rgb::RED,
            Status::Stored => Rgb::GREEN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemLeaf {
    pub id: ItemId,
    pub name: String,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubsetBranch {
    pub name: String,
    pub items: Vec<ItemLeaf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBranch {
    pub category: StorageCategory,
    pub subsets: Vec<SubsetBranch>,
}

/// Panel contents, categories in enumeration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PanelTree {
    pub categories: Vec<CategoryBranch>,
}

/// One displayed row of the panel tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelNode<'a> {
    Category(&'a CategoryBranch),
    Subset(&'a SubsetBranch),
    Item(&'a ItemLeaf),
}

impl PanelNode<'_> {
    /// Indentation level below the hidden root
    pub fn depth(&self) -> usize {
        match self {
            PanelNode::Category(_) => 0,
            PanelNode::Subset(_) => 1,
            PanelNode::Item(_) => 2,
        }
    }

    pub fn text(&self) -> String {
        match self {
            PanelNode::Category(branch) => branch.category.display_name(),
            PanelNode::Subset(branch) => branch.name.clone(),
            PanelNode::Item(leaf) => leaf.name.clone(),
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            PanelNode::Category(_) => Rgb::HEADER_BLUE,
            PanelNode::Subset(_) => Rgb::SET_YELLOW,
            PanelNode::Item(leaf) => leaf.status.color(),
        }
    }

    pub fn tooltip(&self) -> Option<String> {
        match self {
            PanelNode::Item(leaf) => Some(format!("Item ID: {}", leaf.id)),
            PanelNode::Category(_) | PanelNode::Subset(_) => None,
        }
    }
}

impl PanelTree {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Rows in display order: each category, then its sets, each followed by
    /// its items
    pub fn nodes(&self) -> Vec<PanelNode<'_>> {
        let mut nodes = Vec::new();
        for category in &self.categories {
            nodes.push(PanelNode::Category(category));
            for subset in &category.subsets {
                nodes.push(PanelNode::Subset(subset));
                nodes.extend(subset.items.iter().map(PanelNode::Item));
            }
        }
        nodes
    }

    pub fn items(&self) -> impl Iterator<Item = &ItemLeaf> + '_ {
        self.categories
            .iter()
            .flat_map(|c| c.subsets.iter())
            .flat_map(|s| s.items.iter())
    }

    /// Number of item rows per status
    pub fn count(&self, status: Status) -> usize {
        self.items().filter(|leaf| leaf.status == status).count()
    }
}

/// Build the panel tree using only catalog names
pub fn build_panel_tree(catalog: &StorageCatalog, session: &SessionSnapshot) -> PanelTree {
    build_panel_tree_with_names(catalog, session, &NoNames)
}

/// Build the panel tree, asking `names` for entries the catalog has no name for
pub fn build_panel_tree_with_names(
    catalog: &StorageCatalog,
    session: &SessionSnapshot,
    names: &dyn ItemNameResolver,
) -> PanelTree {
    let mut categories = Vec::new();

    for category in StorageCategory::ALL {
        let subsets: Vec<SubsetBranch> = catalog
            .subsets_of(category)
            .iter()
            .filter(|subset| !subset.entries.is_empty())
            .map(|subset| SubsetBranch {
                name: subset.name.clone(),
                items: subset
                    .entries
                    .iter()
                    .map(|entry| ItemLeaf {
                        id: entry.id,
                        name: entry_name(entry, names),
                        status: session.status_of(entry.id),
                    })
                    .collect(),
            })
            .collect();

        if subsets.is_empty() {
            continue;
        }
        categories.push(CategoryBranch { category, subsets });
    }

    PanelTree { categories }
}

fn entry_name(entry: &CatalogEntry, names: &dyn ItemNameResolver) -> String {
    if entry.has_source_name {
        entry.name.clone()
    } else {
        display_name_or_placeholder(names.item_name(entry.id).as_deref(), entry.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ScriptedHost;
    use crate::state::SessionStore;

    const SAMPLE: &str = r#"{
        "CAPE_RACK": [
            { "set_name": "Fire capes", "items": [ { "id": 6570, "name": "Fire cape" } ] },
            { "set_name": "Empty set", "items": [] }
        ],
        "ARMOUR_CASE": [
            { "set_name": "Rune armour (g)", "items": [
                { "id": 2615, "name": "Rune full helm(g)" },
                { "id": 2617 }
            ]}
        ],
        "TOY_BOX": [
            { "set_name": "Nothing here", "items": [] }
        ]
    }"#;

    fn catalog() -> StorageCatalog {
        StorageCatalog::from_json_str(SAMPLE).unwrap()
    }

    #[test]
    fn test_categories_follow_enumeration_order() {
        let tree = build_panel_tree(&catalog(), &SessionSnapshot::default());
        let order: Vec<StorageCategory> = tree.categories.iter().map(|c| c.category).collect();
        assert_eq!(order, vec![StorageCategory::ArmourCase, StorageCategory::CapeRack]);
    }

    #[test]
    fn test_empty_branches_are_suppressed() {
        let tree = build_panel_tree(&catalog(), &SessionSnapshot::default());
        assert!(tree
            .categories
            .iter()
            .all(|c| c.category != StorageCategory::ToyBox));
        let capes = &tree.categories[1];
        assert_eq!(capes.subsets.len(), 1);
        assert_eq!(capes.subsets[0].name, "Fire capes");
    }

    #[test]
    fn test_status_per_item() {
        let store = SessionStore::new();
        store.refresh_bank_and_inventory(&[6570, 2615], &[]);
        store.refresh_housing_storage(|c| (c == StorageCategory::CapeRack).then(|| vec![6570]));

        let tree = store.with_snapshot(|s| build_panel_tree(&catalog(), s));
        let statuses: Vec<(ItemId, Status)> = tree.items().map(|i| (i.id, i.status)).collect();
        assert_eq!(
            statuses,
            vec![
                (2615, Status::Missing),
                (2617, Status::Unknown),
                (6570, Status::Stored),
            ]
        );
        assert_eq!(tree.count(Status::Stored), 1);
    }

    #[test]
    fn test_placeholder_and_resolved_names() {
        let catalog = catalog();
        let tree = build_panel_tree(&catalog, &SessionSnapshot::default());
        let leaf = tree.items().find(|i| i.id == 2617).unwrap();
        assert_eq!(leaf.name, "Unknown Item (ID 2617)");

        let mut host = ScriptedHost::new();
        host.set_name(2617, "<col=ff9040>Rune platebody(g)</col>");
        host.set_name(2615, "Ignored because the catalog has a name");
        let tree = build_panel_tree_with_names(&catalog, &SessionSnapshot::default(), &host);
        let names: Vec<&str> = tree.items().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Rune full helm(g)", "Rune platebody(g)", "Fire cape"]);
    }

    #[test]
    fn test_build_is_deterministic() {
        let first = build_panel_tree(&catalog(), &SessionSnapshot::default());
        let second = build_panel_tree(&catalog(), &SessionSnapshot::default());
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_bundled_catalog_loads_identically_twice() {
        let session = SessionSnapshot::default();
        let first = build_panel_tree(&StorageCatalog::bundled().unwrap(), &session);
        let second = build_panel_tree(&StorageCatalog::bundled().unwrap(), &session);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_empty_catalog_gives_empty_tree() {
        let tree = build_panel_tree(&StorageCatalog::empty(), &SessionSnapshot::default());
        assert!(tree.is_empty());
        assert!(tree.nodes().is_empty());
    }

    #[test]
    fn test_nodes_flatten_in_display_order() {
        let tree = build_panel_tree(&catalog(), &SessionSnapshot::default());
        let rows: Vec<(usize, String)> = tree.nodes().iter().map(|n| (n.depth(), n.text())).collect();
        assert_eq!(
            rows,
            vec![
                (0, "ARMOUR CASE".to_string()),
                (1, "Rune armour (g)".to_string()),
                (2, "Rune full helm(g)".to_string()),
                (2, "Unknown Item (ID 2617)".to_string()),
                (0, "CAPE RACK".to_string()),
                (1, "Fire capes".to_string()),
                (2, "Fire cape".to_string()),
            ]
        );
    }

    #[test]
    fn test_node_styling() {
        let store = SessionStore::new();
        store.refresh_bank_and_inventory(&[2615], &[]);
        let tree = store.with_snapshot(|s| build_panel_tree(&catalog(), s));
        let nodes = tree.nodes();

        assert_eq!(nodes[0].color(), Rgb::HEADER_BLUE);
        assert_eq!(nodes[1].color(), Rgb::SET_YELLOW);
        assert_eq!(nodes[2].color(), Rgb::RED);
        assert_eq!(nodes[3].color(), Rgb::WHITE);
        assert_eq!(nodes[2].tooltip().as_deref(), Some("Item ID: 2615"));
        assert_eq!(nodes[0].tooltip(), None);
    }
}
