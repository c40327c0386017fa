use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tracing::{info, warn};

use crate::registry::{ConnectionHandle, Outbound, Registry, ReplacePolicy};

/// Why the writer half of a connection stopped.
enum WriterExit {
    /// Socket write failed.
    Failed,
    /// A close frame was requested and sent.
    Closed,
    /// The registry dropped our handle (replaced or unregistered).
    Detached,
}

/// Drive one live connection: register, forward notifications, ignore
/// inbound content, unregister once the peer goes away.
pub async fn handle_connection(
    socket: WebSocket,
    registry: Registry,
    user_id: i64,
    policy: ReplacePolicy,
) {
    let (mut sender, mut receiver) = socket.split();

    let (handle, mut outbound_rx) = ConnectionHandle::new();
    let conn_id = handle.id();

    if let Some(previous) = registry.register(user_id, handle).await {
        info!(
            "User {} reconnected: connection {} replaced by {} ({:?})",
            user_id,
            previous.id(),
            conn_id,
            policy
        );
        if policy == ReplacePolicy::Close {
            previous.close();
        }
    }

    info!("User {} connected to live channel ({})", user_id, conn_id);

    let mut send_task = tokio::spawn(async move {
        while let Some(out) = outbound_rx.recv().await {
            match out {
                Outbound::Text(text) => {
                    if sender.send(Message::Text(text.into())).await.is_err() {
                        return WriterExit::Failed;
                    }
                }
                Outbound::Close => {
                    let _ = sender.send(Message::Close(None)).await;
                    return WriterExit::Closed;
                }
            }
        }
        WriterExit::Detached
    });

    // Inbound frames are read only to notice the disconnect.
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if let Message::Close(_) = msg {
                break;
            }
        }
    });

    tokio::select! {
        exit = &mut send_task => match exit {
            Ok(WriterExit::Detached) => {
                // Replaced without a close: stay open until the peer leaves.
                let _ = (&mut recv_task).await;
            }
            Ok(WriterExit::Failed) => {
                warn!("User {} live channel write failed ({})", user_id, conn_id);
                recv_task.abort();
            }
            Ok(WriterExit::Closed) | Err(_) => recv_task.abort(),
        },
        _ = &mut recv_task => send_task.abort(),
    }

    registry.unregister_connection(user_id, conn_id).await;
    info!("User {} disconnected from live channel ({})", user_id, conn_id);
}
