use base64::{Engine, prelude::BASE64_STANDARD};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::MeetError;

pub const DEFAULT_STUN_ADDR: &str = "stun:stun.l.google.com:19302";
pub const DEFAULT_STUN_ADDR_2: &str = "stun:stun1.l.google.com:19302";

/// Route the relay serves its ICE server list on.
pub const ICE_SERVERS_PATH: &str = "/api/ice-servers";

/// Label of the per-peer data channel carrying [`ChatMessage`](crate::ChatMessage)s.
pub const CHAT_CHANNEL_LABEL: &str = "chat";

/// Serializes `value` to JSON and base64-encodes it, the way the browser client
/// does with `btoa(JSON.stringify(..))`.
pub fn encode_payload<T: Serialize>(value: &T) -> Result<String, MeetError> {
    let json = serde_json::to_string(value)?;
    Ok(BASE64_STANDARD.encode(json))
}

pub fn decode_payload<T: DeserializeOwned>(payload: &str) -> Result<T, MeetError> {
    let bytes = BASE64_STANDARD.decode(payload.trim())?;
    let json = String::from_utf8(bytes)?;
    Ok(serde_json::from_str(&json)?)
}
