use indexmap::IndexMap;

use storefront_core::{CartId, ItemId};
use storefront_items::{Item, ItemInfo};

/// One line of a cart: an item snapshot plus how many times it was added.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineItem {
    pub id: ItemId,
    pub info: ItemInfo,
    pub quantity: u64,
}

/// Aggregate root: Cart.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    id: CartId,
    // Keeps the order in which items were first added.
    items: IndexMap<ItemId, CartLineItem>,
}

impl Cart {
    pub fn new(id: CartId) -> Self {
        Self {
            id,
            items: IndexMap::new(),
        }
    }

    pub fn id(&self) -> CartId {
        self.id
    }

    pub fn line(&self, item_id: ItemId) -> Option<&CartLineItem> {
        self.items.get(&item_id)
    }

    pub fn lines(&self) -> impl Iterator<Item = &CartLineItem> {
        self.items.values()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of line prices over lines whose snapshot is not deleted.
    ///
    /// Each distinct line counts its price once, whatever its quantity.
    pub fn price(&self) -> f64 {
        self.lines()
            .filter(|line| !line.info.deleted)
            .map(|line| line.info.price)
            .sum()
    }

    /// Sum of quantities over all lines, deleted snapshots included.
    pub fn quantity(&self) -> u64 {
        self.lines().map(|line| line.quantity).sum()
    }

    /// Add one unit of `item`.
    ///
    /// An existing line only has its quantity bumped; its snapshot is kept as
    /// it was at first add.
    pub fn add_item(&mut self, item: &Item) -> &CartLineItem {
        self.items
            .entry(item.id)
            .and_modify(|line| line.quantity += 1)
            .or_insert_with(|| CartLineItem {
                id: item.id,
                info: item.info.clone(),
                quantity: 1,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, name: &str, price: f64) -> Item {
        Item::new(ItemId::new(id), ItemInfo::new(name, price))
    }

    #[test]
    fn empty_cart_has_zero_price_and_quantity() {
        let cart = Cart::new(CartId::new(0));
        assert!(cart.is_empty());
        assert_eq!(cart.price(), 0.0);
        assert_eq!(cart.quantity(), 0);
    }

    #[test]
    fn adding_same_item_twice_bumps_quantity() {
        let mut cart = Cart::new(CartId::new(0));
        let apple = item(0, "apple", 1.5);

        cart.add_item(&apple);
        let line = cart.add_item(&apple).clone();

        assert_eq!(line.quantity, 2);
        assert_eq!(cart.lines().count(), 1);
        assert_eq!(cart.quantity(), 2);
        assert_eq!(cart.price(), 1.5);
    }

    #[test]
    fn price_skips_deleted_snapshots_but_quantity_counts_them() {
        let mut cart = Cart::new(CartId::new(0));
        let mut gone = item(1, "gone", 10.0);
        gone.info.deleted = true;

        cart.add_item(&item(0, "apple", 1.5));
        cart.add_item(&gone);
        cart.add_item(&gone);

        assert_eq!(cart.price(), 1.5);
        assert_eq!(cart.quantity(), 3);
    }

    #[test]
    fn snapshot_is_not_refreshed_on_re_add() {
        let mut cart = Cart::new(CartId::new(0));
        cart.add_item(&item(0, "apple", 1.5));

        let line = cart.add_item(&item(0, "renamed", 9.0));

        assert_eq!(line.info.name, "apple");
        assert_eq!(line.info.price, 1.5);
    }

    #[test]
    fn lines_keep_first_add_order() {
        let mut cart = Cart::new(CartId::new(0));
        cart.add_item(&item(5, "e", 1.0));
        cart.add_item(&item(2, "b", 1.0));
        cart.add_item(&item(5, "e", 1.0));

        let order: Vec<u64> = cart.lines().map(|l| l.id.get()).collect();
        assert_eq!(order, vec![5, 2]);
    }
}
