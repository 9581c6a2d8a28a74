use thiserror::Error;

use crate::broadcaster::SubscriberId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// The remote end closed the connection.
    #[error("peer closed the connection")]
    PeerClosed,

    /// A message could not be handed to a subscriber that already went away.
    #[error("failed to deliver message to subscriber {0}")]
    SendFailed(SubscriberId),
}
