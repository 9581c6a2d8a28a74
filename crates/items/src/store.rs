//! Item storage abstraction and its in-memory implementation.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use storefront_core::{Bounds, IdGenerator, ItemId, Pagination, StoreError, StoreResult};

use crate::item::{Item, ItemInfo, PatchItemInfo};

const KIND: &str = "item";

/// Listing parameters for `ItemStore::get_many`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ItemQuery {
    pub pagination: Pagination,
    pub price: Bounds<f64>,
    pub show_deleted: bool,
}

impl ItemQuery {
    fn matches(&self, info: &ItemInfo) -> bool {
        self.price.contains(&info.price) && (self.show_deleted || !info.deleted)
    }
}

/// Item catalog storage.
pub trait ItemStore: Send + Sync {
    /// Store `info` under the next id. Always succeeds.
    fn add(&self, info: ItemInfo) -> Item;

    /// Fetch an item, whether or not it has been deleted.
    fn get_one(&self, id: ItemId) -> StoreResult<Item>;

    /// Window over raw store order, then filter by price and deleted flag.
    fn get_many(&self, query: &ItemQuery) -> Vec<Item>;

    /// Overwrite every field of an existing item.
    fn replace(&self, id: ItemId, info: ItemInfo) -> StoreResult<Item>;

    /// Overwrite the `name`/`price` fields present in `patch`.
    fn update(&self, id: ItemId, patch: PatchItemInfo) -> StoreResult<Item>;

    /// Mark an item deleted. Unknown ids are ignored.
    fn delete(&self, id: ItemId);

    /// Number of stored items, deleted ones included.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S> ItemStore for Arc<S>
where
    S: ItemStore + ?Sized,
{
    fn add(&self, info: ItemInfo) -> Item {
        (**self).add(info)
    }

    fn get_one(&self, id: ItemId) -> StoreResult<Item> {
        (**self).get_one(id)
    }

    fn get_many(&self, query: &ItemQuery) -> Vec<Item> {
        (**self).get_many(query)
    }

    fn replace(&self, id: ItemId, info: ItemInfo) -> StoreResult<Item> {
        (**self).replace(id, info)
    }

    fn update(&self, id: ItemId, patch: PatchItemInfo) -> StoreResult<Item> {
        (**self).update(id, patch)
    }

    fn delete(&self, id: ItemId) {
        (**self).delete(id)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

#[derive(Debug, Default)]
struct ItemTable {
    ids: IdGenerator<ItemId>,
    // Ids are issued in increasing order and never re-inserted, so key order
    // is insertion order.
    rows: BTreeMap<ItemId, ItemInfo>,
}

/// In-memory item store. One lock guards both the id sequence and the rows.
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    inner: RwLock<ItemTable>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, ItemTable> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ItemTable> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ItemStore for InMemoryItemStore {
    fn add(&self, info: ItemInfo) -> Item {
        let mut table = self.write();
        let id = table.ids.next_id();
        table.rows.insert(id, info.clone());

        tracing::debug!(item_id = %id, "item added");
        Item::new(id, info)
    }

    fn get_one(&self, id: ItemId) -> StoreResult<Item> {
        self.read()
            .rows
            .get(&id)
            .map(|info| Item::new(id, info.clone()))
            .ok_or_else(|| StoreError::not_found(KIND, id))
    }

    fn get_many(&self, query: &ItemQuery) -> Vec<Item> {
        let table = self.read();

        query
            .pagination
            .window(table.rows.iter())
            .filter(|(_, info)| query.matches(info))
            .map(|(id, info)| Item::new(*id, info.clone()))
            .collect()
    }

    fn replace(&self, id: ItemId, info: ItemInfo) -> StoreResult<Item> {
        let mut table = self.write();
        let slot = table
            .rows
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(KIND, id))?;
        *slot = info.clone();

        tracing::debug!(item_id = %id, "item replaced");
        Ok(Item::new(id, info))
    }

    fn update(&self, id: ItemId, patch: PatchItemInfo) -> StoreResult<Item> {
        let mut table = self.write();
        let info = table
            .rows
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(KIND, id))?;
        patch.apply_to(info);

        tracing::debug!(item_id = %id, "item updated");
        Ok(Item::new(id, info.clone()))
    }

    fn delete(&self, id: ItemId) {
        if let Some(info) = self.write().rows.get_mut(&id) {
            info.deleted = true;
            tracing::debug!(item_id = %id, "item marked deleted");
        }
    }

    fn len(&self) -> usize {
        self.read().rows.len()
    }
}
