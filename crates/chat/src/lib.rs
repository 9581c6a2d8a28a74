//! Chat rooms: per-room fan-out of text messages to every connected subscriber.
//!
//! The crate is transport-agnostic. A connection handler subscribes to a room,
//! forwards whatever arrives on its `Subscription` to the peer, and publishes
//! the peer's messages back into the room.

pub mod broadcaster;
pub mod error;
pub mod message;
pub mod registry;

pub use broadcaster::{Broadcaster, Delivery, SubscriberId, Subscription};
pub use error::ChatError;
pub use message::{ChatMessage, ClientId};
pub use registry::ChatRegistry;
