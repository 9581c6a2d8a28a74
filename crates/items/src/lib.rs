//! Items catalog module.
//!
//! Catalog entries and their in-memory store. Deleting an item only marks it
//! as deleted; the id keeps resolving through `get_one`.

pub mod item;
pub mod store;

pub use item::{Item, ItemInfo, PatchItemInfo};
pub use store::{InMemoryItemStore, ItemQuery, ItemStore};
