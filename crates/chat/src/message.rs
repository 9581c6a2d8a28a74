//! Chat message formats.

use uuid::Uuid;

/// Identifier handed to each chat connection when it joins a room.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Create a fresh, unique client identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for ClientId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Everything a room ever broadcasts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatMessage {
    Subscribed(ClientId),
    Said { from: ClientId, text: String },
    Unsubscribed(ClientId),
}

impl core::fmt::Display for ChatMessage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ChatMessage::Subscribed(client) => write!(f, "client {client} subscribed"),
            ChatMessage::Said { from, text } => write!(f, "{from} :: {text}"),
            ChatMessage::Unsubscribed(client) => write!(f, "client {client} unsubscribed"),
        }
    }
}
