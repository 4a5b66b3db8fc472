use crate::error::ServerError;
use crate::room::Participant;
use axum::extract::ws::Message;
use dashmap::DashMap;
use meet_core::{MessagePayload, PeersPayload, WsMessage};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Default)]
struct Room {
    participants: HashMap<String, Participant>,
}

impl Room {
    fn names_except(&self, name: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .participants
            .keys()
            .filter(|n| n.as_str() != name)
            .cloned()
            .collect();
        names.sort();
        names
    }
}

/// Room membership and relay by recipient name.
#[derive(Debug, Default)]
pub struct RoomService {
    rooms: DashMap<String, Room>,
}

impl RoomService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` in `room_code` and sends it the names already present.
    pub fn join(
        &self,
        room_code: &str,
        name: &str,
        tx: mpsc::UnboundedSender<Message>,
    ) -> Result<Uuid, ServerError> {
        let mut room = self.rooms.entry(room_code.to_owned()).or_default();

        if room.participants.contains_key(name) {
            return Err(ServerError::NameTaken {
                room: room_code.to_owned(),
                name: name.to_owned(),
            });
        }

        let participant = Participant::new(name.to_owned(), tx);
        let connection_id = participant.connection_id;

        let roster = WsMessage::new(
            name,
            MessagePayload::Peers(PeersPayload {
                names: room.names_except(name),
            }),
        );
        participant.send(&roster)?;

        room.participants.insert(name.to_owned(), participant);
        info!(
            "{:?} joined room {:?} ({} present)",
            name,
            room_code,
            room.participants.len()
        );
        Ok(connection_id)
    }

    /// Removes the participant if it still belongs to `connection_id`.
    /// Empty rooms are dropped.
    pub fn leave(&self, room_code: &str, name: &str, connection_id: Uuid) -> bool {
        let removed = match self.rooms.get_mut(room_code) {
            Some(mut room) => {
                let owned = room
                    .participants
                    .get(name)
                    .is_some_and(|p| p.connection_id == connection_id);
                if owned {
                    room.participants.remove(name);
                }
                owned
            }
            None => false,
        };

        if removed {
            info!("{:?} left room {:?}", name, room_code);
            if self
                .rooms
                .remove_if(room_code, |_, room| room.participants.is_empty())
                .is_some()
            {
                debug!("Room {:?} is empty, dropping it", room_code);
            }
        }
        removed
    }

    /// Forwards `message` from `sender` to its recipient in the same room.
    pub fn relay(
        &self,
        room_code: &str,
        sender: &str,
        message: &WsMessage,
    ) -> Result<(), ServerError> {
        if matches!(message.payload, MessagePayload::Peers(_)) {
            return Err(ServerError::RosterFromClient(sender.to_owned()));
        }
        if let Some(claimed) = message.payload.sender() {
            if claimed != sender {
                return Err(ServerError::SenderMismatch {
                    claimed: claimed.to_owned(),
                    actual: sender.to_owned(),
                });
            }
        }

        let room = self
            .rooms
            .get(room_code)
            .ok_or_else(|| ServerError::RoomNotFound(room_code.to_owned()))?;
        let recipient = room
            .participants
            .get(&message.recipient)
            .ok_or_else(|| ServerError::RecipientNotFound(message.recipient.clone()))?;

        debug!(
            "Relaying {} from {:?} to {:?} in {:?}",
            message.payload.kind(),
            sender,
            message.recipient,
            room_code
        );
        recipient.send(message)
    }

    pub fn is_taken(&self, room_code: &str, name: &str) -> bool {
        self.rooms
            .get(room_code)
            .is_some_and(|room| room.participants.contains_key(name))
    }

    pub fn roster(&self, room_code: &str) -> Vec<String> {
        self.rooms
            .get(room_code)
            .map(|room| room.names_except(""))
            .unwrap_or_default()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
