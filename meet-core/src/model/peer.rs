use serde::{Deserialize, Serialize};

use crate::model::{FileInfo, IceCandidateInit};

/// Sent/received ICE candidate counters for one peer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceStats {
    pub sent: u32,
    pub received: u32,
}

impl IceStats {
    pub fn inc_sent(&mut self) {
        self.sent += 1;
    }

    pub fn inc_received(&mut self) {
        self.received += 1;
    }
}

/// Which side of the offer/answer exchange we play with a peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// We learned about the peer from the roster and send the offer.
    Offerer,
    /// The peer offered first.
    Answerer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignalingPhase {
    New,
    HaveLocalOffer,
    HaveRemoteOffer,
    Stable,
}

/// Per-remote-participant session record.
#[derive(Debug, Clone)]
pub struct Peer {
    pub name: String,
    pub role: Role,
    pub phase: SignalingPhase,
    pub ice: IceStats,
    pub file_info: Option<FileInfo>,
    remote_description_set: bool,
    pending_remote: Vec<IceCandidateInit>,
    pending_local: Vec<IceCandidateInit>,
}

impl Peer {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
            phase: SignalingPhase::New,
            ice: IceStats::default(),
            file_info: None,
            remote_description_set: false,
            pending_remote: Vec::new(),
            pending_local: Vec::new(),
        }
    }

    pub fn has_remote_description(&self) -> bool {
        self.remote_description_set
    }

    /// Candidates waiting on the remote description, both directions.
    pub fn pending_candidates(&self) -> (usize, usize) {
        (self.pending_remote.len(), self.pending_local.len())
    }

    pub(crate) fn buffer_remote(&mut self, candidate: IceCandidateInit) {
        self.pending_remote.push(candidate);
    }

    pub(crate) fn buffer_local(&mut self, candidate: IceCandidateInit) {
        self.pending_local.push(candidate);
    }

    /// Marks the remote description applied and hands back everything that was waiting on it.
    pub(crate) fn release_pending(&mut self) -> (Vec<IceCandidateInit>, Vec<IceCandidateInit>) {
        self.remote_description_set = true;
        (
            std::mem::take(&mut self.pending_remote),
            std::mem::take(&mut self.pending_local),
        )
    }
}
