use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{RwLock, mpsc};
use tracing::debug;
use uuid::Uuid;

pub type ConnectionId = Uuid;

/// Frames queued for a live connection's writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Text(String),
    Close,
}

/// Sending half of one live connection. Cheap to clone; the writer task owns
/// the receiving half.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    id: ConnectionId,
    tx: mpsc::UnboundedSender<Outbound>,
}

impl ConnectionHandle {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Outbound>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                id: Uuid::new_v4(),
                tx,
            },
            rx,
        )
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Queue a text frame. Returns false if the connection's writer is gone.
    pub fn send_text(&self, text: String) -> bool {
        self.tx.send(Outbound::Text(text)).is_ok()
    }

    /// Ask the writer to send a close frame and stop.
    pub fn close(&self) -> bool {
        self.tx.send(Outbound::Close).is_ok()
    }
}

/// What the connection layer does with a handle displaced by a newer
/// registration for the same user. The registry itself never closes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReplacePolicy {
    /// Leave the old socket open; it just stops receiving notifications.
    #[default]
    Keep,
    /// Send the old socket a close frame.
    Close,
}

/// In-memory map of who is online. At most one handle per user; all access
/// goes through the methods below.
#[derive(Clone, Default)]
pub struct Registry {
    inner: Arc<RegistryInner>,
}

#[derive(Default)]
struct RegistryInner {
    /// user_id -> current connection
    connections: RwLock<HashMap<i64, ConnectionHandle>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `handle` the live connection for `user_id`. Any previous handle is
    /// replaced unconditionally and returned, untouched, to the caller.
    pub async fn register(&self, user_id: i64, handle: ConnectionHandle) -> Option<ConnectionHandle> {
        self.inner.connections.write().await.insert(user_id, handle)
    }

    /// Remove whatever is registered for `user_id`. No-op if nothing is.
    pub async fn unregister(&self, user_id: i64) -> bool {
        self.inner.connections.write().await.remove(&user_id).is_some()
    }

    /// Remove the entry for `user_id` only if it still belongs to `conn_id`.
    pub async fn unregister_connection(&self, user_id: i64, conn_id: ConnectionId) -> bool {
        let mut connections = self.inner.connections.write().await;
        if connections.get(&user_id).is_some_and(|h| h.id == conn_id) {
            connections.remove(&user_id);
            return true;
        }
        false
    }

    /// Best-effort push. Offline users and dead sockets are ignored.
    pub async fn notify(&self, user_id: i64, message: impl Into<String>) {
        let connections = self.inner.connections.read().await;
        match connections.get(&user_id) {
            Some(handle) => {
                if !handle.send_text(message.into()) {
                    debug!("Dropped notification for user {}: connection writer gone", user_id);
                }
            }
            None => debug!("User {} offline, notification skipped", user_id),
        }
    }

    pub async fn is_online(&self, user_id: i64) -> bool {
        self.inner.connections.read().await.contains_key(&user_id)
    }

    pub async fn current_connection(&self, user_id: i64) -> Option<ConnectionId> {
        self.inner.connections.read().await.get(&user_id).map(|h| h.id)
    }

    pub async fn online_count(&self) -> usize {
        self.inner.connections.read().await.len()
    }
}
