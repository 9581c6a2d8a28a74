use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::broadcaster::Broadcaster;

/// Room name to broadcaster map.
///
/// Rooms are created on first use and live for the rest of the process.
#[derive(Debug, Default)]
pub struct ChatRegistry {
    rooms: Mutex<HashMap<String, Arc<Broadcaster>>>,
}

impl ChatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<Broadcaster>>> {
        self.rooms.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get the broadcaster for `room`, creating it if this is the first request.
    ///
    /// Lookup and insert happen under one lock, so racing first connections
    /// always end up sharing a single broadcaster.
    pub fn broadcaster(&self, room: &str) -> Arc<Broadcaster> {
        let mut rooms = self.lock();
        if let Some(existing) = rooms.get(room) {
            return Arc::clone(existing);
        }

        tracing::debug!(room, "creating chat room");
        let created = Arc::new(Broadcaster::new());
        rooms.insert(room.to_owned(), Arc::clone(&created));
        created
    }

    /// Look up a room without creating it.
    pub fn get(&self, room: &str) -> Option<Arc<Broadcaster>> {
        self.lock().get(room).cloned()
    }

    pub fn room_count(&self) -> usize {
        self.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcaster_is_created_lazily_once_per_name() {
        let registry = ChatRegistry::new();
        assert!(registry.get("lobby").is_none());

        let first = registry.broadcaster("lobby");
        let second = registry.broadcaster("lobby");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.room_count(), 1);
    }

    #[test]
    fn rooms_are_isolated() {
        let registry = ChatRegistry::new();
        let mut lobby = registry.broadcaster("lobby").subscribe();
        let mut other = registry.broadcaster("other").subscribe();

        registry.broadcaster("lobby").publish("only lobby");

        assert_eq!(lobby.try_recv().as_deref(), Some("only lobby"));
        assert_eq!(other.try_recv(), None);
        assert_eq!(registry.room_count(), 2);
    }

    #[test]
    fn racing_first_connections_share_one_broadcaster() {
        let registry = Arc::new(ChatRegistry::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.broadcaster("race"))
            })
            .collect();

        let rooms: Vec<Arc<Broadcaster>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert!(rooms.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(registry.room_count(), 1);
    }
}
