use std::sync::Arc;

use storefront_carts::{CartLineItem, CartStore, InMemoryCartStore};
use storefront_chat::ChatRegistry;
use storefront_core::{CartId, ItemId, StoreResult};
use storefront_items::{InMemoryItemStore, ItemStore};

/// Everything a request handler may touch, built once at process start.
///
/// Handlers receive it through an `Extension`, so tests can spin up as many
/// isolated instances as they like.
#[derive(Clone)]
pub struct AppServices {
    items: Arc<dyn ItemStore>,
    carts: Arc<dyn CartStore>,
    chats: Arc<ChatRegistry>,
}

impl AppServices {
    pub fn new(items: Arc<dyn ItemStore>, carts: Arc<dyn CartStore>, chats: Arc<ChatRegistry>) -> Self {
        Self { items, carts, chats }
    }

    /// In-memory wiring: the only storage this service has.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryItemStore::new()),
            Arc::new(InMemoryCartStore::new()),
            Arc::new(ChatRegistry::new()),
        )
    }

    pub fn items(&self) -> &dyn ItemStore {
        self.items.as_ref()
    }

    pub fn carts(&self) -> &dyn CartStore {
        self.carts.as_ref()
    }

    pub fn chats(&self) -> &ChatRegistry {
        &self.chats
    }

    /// Check that both the item and the cart exist, then add the item.
    pub fn add_item_to_cart(&self, cart_id: CartId, item_id: ItemId) -> StoreResult<CartLineItem> {
        let item = self.items.get_one(item_id)?;
        self.carts.get_one(cart_id)?;
        self.carts.add_item_to_cart(cart_id, &item)
    }
}

impl core::fmt::Debug for AppServices {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppServices")
            .field("items", &self.items.len())
            .field("carts", &self.carts.len())
            .field("rooms", &self.chats.room_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use storefront_items::ItemInfo;

    use super::*;

    #[test]
    fn add_item_to_cart_checks_item_first() {
        let services = AppServices::in_memory();

        let err = services
            .add_item_to_cart(CartId::new(0), ItemId::new(0))
            .unwrap_err();

        assert_eq!(err, storefront_core::StoreError::not_found("item", 0u64));
    }

    #[test]
    fn add_item_to_cart_requires_existing_cart() {
        let services = AppServices::in_memory();
        let item = services.items().add(ItemInfo::new("apple", 1.5));

        let err = services.add_item_to_cart(CartId::new(0), item.id).unwrap_err();

        assert_eq!(err, storefront_core::StoreError::not_found("cart", 0u64));
    }

    #[test]
    fn add_item_to_cart_uses_current_item_info() {
        let services = AppServices::in_memory();
        let item = services.items().add(ItemInfo::new("apple", 1.5));
        let cart = services.carts().add();
        services.items().delete(item.id);

        let line = services.add_item_to_cart(cart.id(), item.id).unwrap();

        assert!(line.info.deleted);
        assert_eq!(services.carts().get_one(cart.id()).unwrap().price(), 0.0);
    }
}
