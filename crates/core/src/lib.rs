//! `storefront-core` — building blocks shared by the storefront stores.
//!
//! This crate contains **pure** primitives (no IO, no HTTP, no locking).

pub mod error;
pub mod id;
pub mod query;

pub use error::{StoreError, StoreResult};
pub use id::{CartId, IdGenerator, ItemId};
pub use query::{Bounds, Pagination};
