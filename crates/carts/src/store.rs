//! Cart storage abstraction and its in-memory implementation.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use storefront_core::{Bounds, CartId, IdGenerator, Pagination, StoreError, StoreResult};
use storefront_items::Item;

use crate::cart::{Cart, CartLineItem};

const KIND: &str = "cart";

/// Listing parameters for `CartStore::get_many`, applied to derived totals.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CartQuery {
    pub pagination: Pagination,
    pub price: Bounds<f64>,
    pub quantity: Bounds<u64>,
}

impl CartQuery {
    fn matches(&self, cart: &Cart) -> bool {
        self.price.contains(&cart.price()) && self.quantity.contains(&cart.quantity())
    }
}

/// Cart storage.
pub trait CartStore: Send + Sync {
    /// Create an empty cart under the next id. Always succeeds.
    fn add(&self) -> Cart;

    fn get_one(&self, id: CartId) -> StoreResult<Cart>;

    /// Window over raw store order, then filter by cart price and quantity.
    fn get_many(&self, query: &CartQuery) -> Vec<Cart>;

    /// Add one unit of `item` to an existing cart.
    ///
    /// Callers are expected to have checked that both the cart and the item
    /// exist; an unknown cart still yields `NotFound` rather than a panic.
    fn add_item_to_cart(&self, cart_id: CartId, item: &Item) -> StoreResult<CartLineItem>;

    /// Remove a cart. Unknown ids are ignored.
    fn delete(&self, id: CartId);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S> CartStore for Arc<S>
where
    S: CartStore + ?Sized,
{
    fn add(&self) -> Cart {
        (**self).add()
    }

    fn get_one(&self, id: CartId) -> StoreResult<Cart> {
        (**self).get_one(id)
    }

    fn get_many(&self, query: &CartQuery) -> Vec<Cart> {
        (**self).get_many(query)
    }

    fn add_item_to_cart(&self, cart_id: CartId, item: &Item) -> StoreResult<CartLineItem> {
        (**self).add_item_to_cart(cart_id, item)
    }

    fn delete(&self, id: CartId) {
        (**self).delete(id)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

#[derive(Debug, Default)]
struct CartTable {
    ids: IdGenerator<CartId>,
    rows: BTreeMap<CartId, Cart>,
}

/// In-memory cart store. One lock guards both the id sequence and the rows.
#[derive(Debug, Default)]
pub struct InMemoryCartStore {
    inner: RwLock<CartTable>,
}

impl InMemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, CartTable> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CartTable> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CartStore for InMemoryCartStore {
    fn add(&self) -> Cart {
        let mut table = self.write();
        let id = table.ids.next_id();
        let cart = Cart::new(id);
        table.rows.insert(id, cart.clone());

        tracing::debug!(cart_id = %id, "cart created");
        cart
    }

    fn get_one(&self, id: CartId) -> StoreResult<Cart> {
        self.read()
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(KIND, id))
    }

    fn get_many(&self, query: &CartQuery) -> Vec<Cart> {
        let table = self.read();

        query
            .pagination
            .window(table.rows.values())
            .filter(|cart| query.matches(cart))
            .cloned()
            .collect()
    }

    fn add_item_to_cart(&self, cart_id: CartId, item: &Item) -> StoreResult<CartLineItem> {
        let mut table = self.write();
        let cart = table
            .rows
            .get_mut(&cart_id)
            .ok_or_else(|| StoreError::not_found(KIND, cart_id))?;
        let line = cart.add_item(item).clone();

        tracing::debug!(
            cart_id = %cart_id,
            item_id = %item.id,
            quantity = line.quantity,
            "item added to cart"
        );
        Ok(line)
    }

    fn delete(&self, id: CartId) {
        if self.write().rows.remove(&id).is_some() {
            tracing::debug!(cart_id = %id, "cart deleted");
        }
    }

    fn len(&self) -> usize {
        self.read().rows.len()
    }
}
