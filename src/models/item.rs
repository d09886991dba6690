//! Catalog item types
//!
//! `Item` is the persisted record; `NewItem` is a validated item without an id.

use serde::{Deserialize, Serialize};

/// Maximum length of an item name, in characters
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum length of an item category, in characters
pub const MAX_CATEGORY_LENGTH: usize = 50;

// == Item ==
/// A priced, categorized catalog entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Store-assigned identifier, strictly increasing
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub price: f64,
}

impl Item {
    /// Case-insensitive substring match against name and category.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .category
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(needle))
    }
}

// == New Item ==
/// Item fields accepted for creation, already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub category: Option<String>,
    pub price: f64,
}

impl NewItem {
    /// Attaches the store-assigned id.
    pub fn with_id(self, id: u64) -> Item {
        Item {
            id,
            name: self.name,
            category: self.category,
            price: self.price,
        }
    }
}
