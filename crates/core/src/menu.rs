//! Menu

use std::{
    cmp::Reverse,
    fmt::{self, Display, Formatter},
};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::amount::Amount;

/// Category name that matches every menu item.
pub const ALL_CATEGORIES: &str = "all";

/// Stable product identifier used to deduplicate cart lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A dish offered on the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Stable product identifier.
    #[serde(alias = "_id")]
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Unit price.
    pub price: Amount,

    /// Menu category, e.g. `"veg"`.
    #[serde(default)]
    pub category: String,

    /// Optional long description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Optional image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Menu response shapes accepted from the backend.
///
/// Some deployments return a bare array, others wrap it as `{"menu": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MenuPayload {
    /// Bare array of menu entries.
    Items(Vec<Value>),

    /// Wrapped menu entries.
    Wrapped {
        /// Menu entries.
        #[serde(default)]
        menu: Vec<Value>,
    },
}

impl MenuPayload {
    /// Normalize the payload into typed menu items.
    ///
    /// Entries that cannot be decoded (most commonly because they carry no
    /// identifier) are skipped so one bad row does not hide the whole menu.
    pub fn into_items(self) -> Vec<MenuItem> {
        let raw = match self {
            MenuPayload::Items(items) | MenuPayload::Wrapped { menu: items } => items,
        };

        raw.into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value::<MenuItem>(entry) {
                Ok(item) if !item.id.as_str().is_empty() => Some(item),
                Ok(item) => {
                    warn!(index, name = %item.name, "skipping menu item without an id");
                    None
                }
                Err(error) => {
                    warn!(index, %error, "skipping undecodable menu item");
                    None
                }
            })
            .collect()
    }
}

/// Price ordering applied to the menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriceSort {
    /// Backend order.
    #[default]
    Default,

    /// Cheapest first.
    LowToHigh,

    /// Most expensive first.
    HighToLow,
}

/// Category, search and sort filters for the menu page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuQuery {
    /// Category to show, or [`ALL_CATEGORIES`].
    pub category: String,

    /// Free-text search over name and category.
    pub search: String,

    /// Price ordering.
    pub sort: PriceSort,
}

impl Default for MenuQuery {
    fn default() -> Self {
        Self {
            category: ALL_CATEGORIES.to_string(),
            search: String::new(),
            sort: PriceSort::Default,
        }
    }
}

impl MenuQuery {
    /// Apply the query to a menu, returning the matching items.
    pub fn apply<'a>(&self, menu: &'a [MenuItem]) -> Vec<&'a MenuItem> {
        let needle = self.search.trim().to_lowercase();

        let mut items: Vec<&MenuItem> = menu
            .iter()
            .filter(|item| self.category == ALL_CATEGORIES || item.category == self.category)
            .filter(|item| {
                needle.is_empty()
                    || item.name.to_lowercase().contains(&needle)
                    || item.category.to_lowercase().contains(&needle)
            })
            .collect();

        match self.sort {
            PriceSort::Default => {}
            PriceSort::LowToHigh => items.sort_by_key(|item| item.price),
            PriceSort::HighToLow => items.sort_by_key(|item| Reverse(item.price)),
        }

        items
    }
}

/// Categories present in the menu, prefixed with [`ALL_CATEGORIES`].
pub fn categories(menu: &[MenuItem]) -> Vec<&str> {
    let mut seen = FxHashSet::default();

    std::iter::once(ALL_CATEGORIES)
        .chain(
            menu.iter()
                .map(|item| item.category.as_str())
                .filter(|category| seen.insert(*category)),
        )
        .collect()
}

/// Find a menu item by its identifier.
pub fn find<'a>(menu: &'a [MenuItem], id: &ProductId) -> Option<&'a MenuItem> {
    menu.iter().find(|item| &item.id == id)
}
