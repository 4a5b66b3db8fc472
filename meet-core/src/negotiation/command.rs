use crate::model::{IceCandidateInit, Role, SessionDescription, WsMessage};

/// Side effect the host must perform for the [`Negotiator`](super::Negotiator).
///
/// Commands returned together must be executed in order. Results flow back
/// through `local_description`, `remote_description_applied`,
/// `local_candidate` and `candidate_added`.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Build a peer connection for `peer` with local media attached.
    Connect { peer: String, role: Role },

    /// Create an offer, set it as local description, report it back.
    CreateOffer { peer: String },

    /// Apply `offer` as remote description, then create and report an answer.
    AcceptOffer {
        peer: String,
        offer: SessionDescription,
    },

    /// Apply `answer` as remote description.
    ApplyAnswer {
        peer: String,
        answer: SessionDescription,
    },

    /// Hand a remote ICE candidate to the peer connection.
    AddCandidate {
        peer: String,
        candidate: IceCandidateInit,
    },

    /// Write an envelope to the signaling socket.
    Send(WsMessage),
}

impl Command {
    /// Remote participant the command concerns. For `Send` that is the recipient.
    pub fn peer(&self) -> &str {
        match self {
            Command::Connect { peer, .. }
            | Command::CreateOffer { peer }
            | Command::AcceptOffer { peer, .. }
            | Command::ApplyAnswer { peer, .. }
            | Command::AddCandidate { peer, .. } => peer,
            Command::Send(msg) => &msg.recipient,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Command::Connect { .. } => "connect",
            Command::CreateOffer { .. } => "create-offer",
            Command::AcceptOffer { .. } => "accept-offer",
            Command::ApplyAnswer { .. } => "apply-answer",
            Command::AddCandidate { .. } => "add-candidate",
            Command::Send(_) => "send",
        }
    }
}
