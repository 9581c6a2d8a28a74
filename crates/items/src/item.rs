use serde::{Deserialize, Serialize};

use storefront_core::ItemId;

/// Mutable catalog data stored under an item id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInfo {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub deleted: bool,
}

impl ItemInfo {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            deleted: false,
        }
    }
}

/// Read view pairing an id with its info. Built on every read, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub info: ItemInfo,
}

impl Item {
    pub fn new(id: ItemId, info: ItemInfo) -> Self {
        Self { id, info }
    }
}

/// Sparse overwrite of an item's fields.
///
/// `deleted` is carried for completeness but is never applied by an update;
/// the only way to mark an item deleted is `ItemStore::delete`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatchItemInfo {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub deleted: Option<bool>,
}

impl PatchItemInfo {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none()
    }

    /// Overwrite the fields present in the patch, leaving the rest untouched.
    pub fn apply_to(&self, info: &mut ItemInfo) {
        if let Some(name) = &self.name {
            info.name = name.clone();
        }
        if let Some(price) = self.price {
            info.price = price;
        }
    }
}
