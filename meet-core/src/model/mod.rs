mod chat;
mod envelope;
mod ice;
mod peer;

pub use chat::ChatMessage;
pub use envelope::{
    EchoPayload, FileInfo, MessagePayload, PeersPayload, SignalPayload, WsMessage,
};
pub use ice::{IceCandidateInit, IceServerConfig, SdpType, SessionDescription, default_ice_servers};
pub use peer::{IceStats, Peer, Role, SignalingPhase};
