use crate::error::MeetError;
use serde::{Deserialize, Serialize};

/// Envelope relayed by the signaling server to `recipient` inside the sender's room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WsMessage {
    pub recipient: String,
    pub payload: MessagePayload,
}

/// Payload variants are told apart by which key is present:
/// `{"offer": {...}}`, `{"peers": {...}}` and so on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessagePayload {
    Peers(PeersPayload),
    Offer(SignalPayload),
    Answer(SignalPayload),
    Candidate(SignalPayload),
    Echo(EchoPayload),
    File(FileInfo),
}

/// Room roster sent by the relay to a participant who just joined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeersPayload {
    pub names: Vec<String>,
}

/// Offer, answer and candidate bodies. `payload` is base64 of the browser JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalPayload {
    pub sender: String,
    pub payload: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EchoPayload {
    pub message: String,
}

/// File-transfer announcement. Only the metadata is exchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub sender: String,
    pub file_name: String,
    pub file_size: u64,
}

impl WsMessage {
    pub fn new(recipient: impl Into<String>, payload: MessagePayload) -> Self {
        Self {
            recipient: recipient.into(),
            payload,
        }
    }

    pub fn to_json(&self) -> Result<String, MeetError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, MeetError> {
        Ok(serde_json::from_str(text)?)
    }
}

impl MessagePayload {
    /// Name the payload claims to come from, for variants that carry one.
    pub fn sender(&self) -> Option<&str> {
        match self {
            MessagePayload::Offer(p) | MessagePayload::Answer(p) | MessagePayload::Candidate(p) => {
                Some(&p.sender)
            }
            MessagePayload::File(f) => Some(&f.sender),
            MessagePayload::Peers(_) | MessagePayload::Echo(_) => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            MessagePayload::Peers(_) => "peers",
            MessagePayload::Offer(_) => "offer",
            MessagePayload::Answer(_) => "answer",
            MessagePayload::Candidate(_) => "candidate",
            MessagePayload::Echo(_) => "echo",
            MessagePayload::File(_) => "file",
        }
    }
}
