use serde::{Deserialize, Serialize};
use std::fmt;

/// Game item identifier as reported by the client.
///
/// Container slots report `0` or `-1` for empty slots, so the type is signed
/// and every consumer filters non-positive ids.
pub type ItemId = i32;

/// Storage locations in the player-owned house costume room.
///
/// The set is closed; declaration order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StorageCategory {
    ArmourCase,
    ToyBox,
    MagicWardrobe,
    CapeRack,
    TreasureChest,
    FancyDressBox,
    Bookcase,
}

impl StorageCategory {
    pub const ALL: [StorageCategory; 7] = [
        StorageCategory::ArmourCase,
        StorageCategory::ToyBox,
        StorageCategory::MagicWardrobe,
        StorageCategory::CapeRack,
        StorageCategory::TreasureChest,
        StorageCategory::FancyDressBox,
        StorageCategory::Bookcase,
    ];

    /// Tag used by the bundled data file, e.g. `ARMOUR_CASE`.
    pub fn tag(&self) -> &'static str {
        match self {
            StorageCategory::ArmourCase => "ARMOUR_CASE",
            StorageCategory::ToyBox => "TOY_BOX",
            StorageCategory::MagicWardrobe => "MAGIC_WARDROBE",
            StorageCategory::CapeRack => "CAPE_RACK",
            StorageCategory::TreasureChest => "TREASURE_CHEST",
            StorageCategory::FancyDressBox => "FANCY_DRESS_BOX",
            StorageCategory::Bookcase => "BOOKCASE",
        }
    }

    /// Parse a data-file tag. Exact match only.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.tag() == tag)
    }

    /// Tag with separators replaced by spaces, e.g. `ARMOUR CASE`.
    pub fn display_name(&self) -> String {
        self.tag().replace('_', " ")
    }

    /// Item whose icon stands in for the whole category in the panel header.
    pub fn representative_item_id(&self) -> Option<ItemId> {
        match self {
            StorageCategory::ArmourCase => Some(1127),     // Rune platebody
            StorageCategory::ToyBox => Some(2520),         // Toy horsey
            StorageCategory::MagicWardrobe => Some(577),   // Wizard robe
            StorageCategory::CapeRack => Some(6570),       // Fire cape
            StorageCategory::TreasureChest => Some(995),   // Coins
            StorageCategory::FancyDressBox => Some(1038),  // Red partyhat
            StorageCategory::Bookcase => None,
        }
    }
}

impl fmt::Display for StorageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Classification of a catalog item against the current session observations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Not seen in housing storage, bank or inventory
    Unknown,
    /// Owned (bank or inventory) but not placed in housing storage
    Missing,
    /// Seen in the housing-storage interface
    Stored,
}

/// Client game state, only the variants the plugin reacts to are named
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    LoginScreen,
    LoggingIn,
    Loading,
    LoggedIn,
    ConnectionLost,
    Hopping,
}

impl GameState {
    /// Returns true for the states that invalidate every session observation
    /// (logout, world hop, lost connection).
    pub fn ends_session(&self) -> bool {
        matches!(
            self,
            GameState::LoginScreen | GameState::Hopping | GameState::ConnectionLost
        )
    }
}
