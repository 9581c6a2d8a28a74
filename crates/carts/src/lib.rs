//! Carts module.
//!
//! A cart aggregates line items, each holding a snapshot of the item info
//! taken when the item was first added. Carts never hold a reference to the
//! item store; callers pass the `Item` in.

pub mod cart;
pub mod store;

pub use cart::{Cart, CartLineItem};
pub use store::{CartQuery, CartStore, InMemoryCartStore};
