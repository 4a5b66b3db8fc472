use serde::{Deserialize, Serialize};

use crate::error::MeetError;

/// Text message exchanged over a peer's `chat` data channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: String,
    pub msg: String,
    /// Milliseconds since the Unix epoch at creation.
    pub timestamp: u64,
}

impl ChatMessage {
    pub fn new(sender: impl Into<String>, msg: impl Into<String>, timestamp: u64) -> Self {
        Self {
            sender: sender.into(),
            msg: msg.into(),
            timestamp,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, MeetError> {
        Ok(postcard::to_allocvec(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MeetError> {
        Ok(postcard::from_bytes(bytes)?)
    }
}
