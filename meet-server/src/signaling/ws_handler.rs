use crate::error::ServerError;
use crate::{AppState, RoomService};
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, State, WebSocketUpgrade};
use axum::response::{IntoResponse, Response};
use futures::{SinkExt, StreamExt};
use meet_core::WsMessage;
use std::ops::ControlFlow;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path((room, name)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ServerError> {
    let room = room.trim().to_owned();
    let name = name.trim().to_owned();
    if room.is_empty() || name.is_empty() {
        return Err(ServerError::InvalidPath);
    }
    if state.rooms.is_taken(&room, &name) {
        return Err(ServerError::NameTaken { room, name });
    }

    info!("ws connection for {:?} in room {:?}", name, room);
    let rooms = state.rooms.clone();
    Ok(ws
        .on_upgrade(move |socket| handle_socket(socket, room, name, rooms))
        .into_response())
}

async fn handle_socket(socket: WebSocket, room: String, name: String, rooms: Arc<RoomService>) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    let connection_id = match rooms.join(&room, &name, tx) {
        Ok(id) => id,
        Err(e) => {
            warn!("Rejecting {:?}: {}", name, e);
            let _ = sender.send(Message::Close(None)).await;
            return;
        }
    };

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let rooms = rooms.clone();
        let room = room.clone();
        let name = name.clone();

        async move {
            let mut count = 0usize;
            while let Some(Ok(msg)) = receiver.next().await {
                count += 1;
                if process_message(msg, &room, &name, &rooms).is_break() {
                    break;
                }
            }
            count
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        res = (&mut recv_task) => {
            send_task.abort();
            match res {
                Ok(count) => info!("{:?} sent {} frames", name, count),
                Err(e) => error!("Receive task for {:?} failed: {:?}", name, e),
            }
        }
    };

    rooms.leave(&room, &name, connection_id);
    info!("WebSocket disconnected: {:?}", name);
}

fn process_message(msg: Message, room: &str, name: &str, rooms: &RoomService) -> ControlFlow<()> {
    match msg {
        Message::Text(text) => match WsMessage::from_json(text.as_str()) {
            Ok(message) => {
                if let Err(e) = rooms.relay(room, name, &message) {
                    warn!("Dropping {} from {:?}: {}", message.payload.kind(), name, e);
                }
            }
            Err(e) => warn!("Invalid WsMessage from {:?}: {}", name, e),
        },
        Message::Close(frame) => {
            match frame {
                Some(cf) => info!(
                    "{:?} sent close with code {} and reason `{}`",
                    name,
                    cf.code,
                    cf.reason.as_str()
                ),
                None => info!("{:?} sent close without a frame", name),
            }
            return ControlFlow::Break(());
        }
        _ => {}
    }
    ControlFlow::Continue(())
}
