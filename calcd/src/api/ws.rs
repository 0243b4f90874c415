//! WebSocket chat relay.
//!
//! A free-text channel unrelated to the structured tool-call path: every
//! text frame a client sends is forwarded verbatim to all other connected
//! clients. A turn ends with the [`DONE_SENTINEL`] frame, which is relayed
//! like any other frame so receivers can detect completion.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;

use crate::api::http::AppState;

/// Frame marking the end of a chat turn
pub const DONE_SENTINEL: &str = "[DONE]";

/// Broadcast hub connecting all chat clients.
///
/// Frames are tagged with the sender's connection id so the relay never
/// echoes a frame back to its origin.
#[derive(Clone)]
pub struct ChatHub {
    tx: broadcast::Sender<(u64, String)>,
    next_id: Arc<AtomicU64>,
}

impl ChatHub {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            tx,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    fn register(&self) -> (u64, broadcast::Receiver<(u64, String)>) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        (id, self.tx.subscribe())
    }

    fn publish(&self, origin: u64, text: String) {
        // Fails only when no client is subscribed, which is fine
        let _ = self.tx.send((origin, text));
    }
}

/// WebSocket upgrade handler for `GET /chat`
pub async fn chat_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let (conn_id, mut relay_rx) = state.chat.register();
    state.metrics.chat_connected();
    debug!(conn_id, "Chat client connected");

    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            incoming = receiver.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        if text.as_str() == DONE_SENTINEL {
                            state.metrics.record_chat_turn();
                        }
                        state.chat.publish(conn_id, text.to_string());
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => continue, // binary/ping/pong frames are ignored
                    Some(Err(_)) => break,
                }
            }
            relayed = relay_rx.recv() => {
                match relayed {
                    Ok((origin, _)) if origin == conn_id => continue,
                    Ok((_, text)) => {
                        if sender.send(Message::Text(text.into())).await.is_err() {
                            break;
                        }
                    }
                    // A slow client that lagged behind just skips frames
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    state.metrics.chat_disconnected();
    debug!(conn_id, "Chat client disconnected");
}
