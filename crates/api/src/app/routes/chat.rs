//! WebSocket chat rooms.
//!
//! Every connection to `/chat/{room}` joins that room's broadcaster. Text
//! frames from the peer are relayed to everyone in the room (the sender
//! included) as `"{client} :: {text}"`. Joining and leaving are announced the
//! same way.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Extension, Path,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use futures::{
    stream::{SplitSink, SplitStream},
    SinkExt, StreamExt,
};

use storefront_chat::{Broadcaster, ChatError, ChatMessage, ClientId, Subscription};

use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/:room", get(join_room))
}

pub async fn join_room(
    Extension(services): Extension<Arc<AppServices>>,
    Path(room): Path<String>,
    ws: WebSocketUpgrade,
) -> axum::response::Response {
    let broadcaster = services.chats().broadcaster(&room);
    ws.on_upgrade(move |socket| run_session(socket, room, broadcaster))
        .into_response()
}

async fn run_session(socket: WebSocket, room: String, broadcaster: Arc<Broadcaster>) {
    let client = ClientId::new();
    let (sink, mut stream) = socket.split();

    let subscription = broadcaster.subscribe();
    let subscriber = subscription.id();
    let writer = tokio::spawn(forward_to_peer(subscription, sink));

    tracing::info!(room = %room, client = %client, "chat client joined");
    broadcaster.publish(ChatMessage::Subscribed(client).to_string());

    loop {
        match next_text(&mut stream).await {
            Ok(text) => {
                broadcaster.publish(ChatMessage::Said { from: client, text }.to_string());
            }
            Err(err) => {
                tracing::debug!(room = %room, client = %client, reason = %err, "chat read loop ended");
                break;
            }
        }
    }

    broadcaster.unsubscribe(subscriber);
    broadcaster.publish(ChatMessage::Unsubscribed(client).to_string());
    writer.abort();
    tracing::info!(room = %room, client = %client, "chat client left");
}

/// Push everything the room sends this subscriber out to the peer.
async fn forward_to_peer(mut subscription: Subscription, mut sink: SplitSink<WebSocket, Message>) {
    while let Some(text) = subscription.recv().await {
        if let Err(err) = sink.send(Message::Text(text)).await {
            tracing::warn!(error = %err, "failed to write chat frame");
            break;
        }
    }
}

/// Next text frame from the peer. Control and binary frames are skipped.
async fn next_text(stream: &mut SplitStream<WebSocket>) -> Result<String, ChatError> {
    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => return Ok(text),
            Ok(Message::Close(_)) => return Err(ChatError::PeerClosed),
            Ok(Message::Ping(_) | Message::Pong(_) | Message::Binary(_)) => continue,
            Err(err) => {
                tracing::debug!(error = %err, "chat socket error");
                return Err(ChatError::PeerClosed);
            }
        }
    }
    Err(ChatError::PeerClosed)
}
