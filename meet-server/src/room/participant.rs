use axum::extract::ws::Message;
use meet_core::WsMessage;
use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

use crate::error::ServerError;

/// One connected socket inside a room. Outgoing frames go through the
/// socket's writer task.
#[derive(Debug)]
pub struct Participant {
    pub name: String,
    pub connection_id: Uuid,
    tx: mpsc::UnboundedSender<Message>,
}

impl Participant {
    pub fn new(name: String, tx: mpsc::UnboundedSender<Message>) -> Self {
        Self {
            name,
            connection_id: Uuid::new_v4(),
            tx,
        }
    }

    pub fn send(&self, message: &WsMessage) -> Result<(), ServerError> {
        debug!(
            "Sending {} to {:?}",
            message.payload.kind(),
            self.name
        );
        let json = message.to_json()?;
        self.tx
            .send(Message::Text(json.into()))
            .map_err(|_| ServerError::ParticipantGone(self.name.clone()))
    }
}
