//! Per-peer offer/answer/candidate bookkeeping, free of any browser or socket types.
//!
//! The host feeds in envelopes from the signaling socket and results of the
//! WebRTC calls it made; the negotiator answers with the next [`Command`]s.
//! Candidates that arrive (or are gathered) before a peer's remote
//! description is in place are held back and released by
//! [`Negotiator::remote_description_applied`].

mod command;

pub use command::Command;

use std::collections::HashMap;

use crate::error::MeetError;
use crate::model::{
    EchoPayload, IceCandidateInit, IceStats, MessagePayload, Peer, Role, SdpType,
    SessionDescription, SignalPayload, SignalingPhase, WsMessage,
};
use crate::utils::{decode_payload, encode_payload};

pub const ECHO_GREETING: &str = "hello";

#[derive(Debug)]
pub struct Negotiator {
    my_name: String,
    peers: HashMap<String, Peer>,
}

impl Negotiator {
    pub fn new(my_name: impl Into<String>) -> Self {
        Self {
            my_name: my_name.into(),
            peers: HashMap::new(),
        }
    }

    pub fn my_name(&self) -> &str {
        &self.my_name
    }

    pub fn peer(&self, name: &str) -> Option<&Peer> {
        self.peers.get(name)
    }

    pub fn peer_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.peers.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn ice_stats(&self) -> HashMap<String, IceStats> {
        self.peers
            .iter()
            .map(|(name, peer)| (name.clone(), peer.ice))
            .collect()
    }

    /// Greeting sent to ourselves once the socket opens.
    pub fn echo(&self) -> WsMessage {
        WsMessage::new(
            self.my_name.clone(),
            MessagePayload::Echo(EchoPayload {
                message: ECHO_GREETING.to_string(),
            }),
        )
    }

    /// Reacts to one envelope received from the signaling socket.
    pub fn handle(&mut self, msg: WsMessage) -> Result<Vec<Command>, MeetError> {
        match msg.payload {
            MessagePayload::Peers(roster) => Ok(self.handle_roster(roster.names)),
            MessagePayload::Offer(offer) => self.handle_offer(offer),
            MessagePayload::Answer(answer) => self.handle_answer(answer),
            MessagePayload::Candidate(candidate) => self.handle_candidate(candidate),
            MessagePayload::Echo(_) => Ok(Vec::new()),
            MessagePayload::File(info) => {
                if let Some(peer) = self.peers.get_mut(&info.sender) {
                    peer.file_info = Some(info);
                }
                Ok(Vec::new())
            }
        }
    }

    fn handle_roster(&mut self, names: Vec<String>) -> Vec<Command> {
        let mut commands = Vec::new();
        for name in names {
            if name == self.my_name || self.peers.contains_key(&name) {
                continue;
            }
            self.peers
                .insert(name.clone(), Peer::new(name.clone(), Role::Offerer));
            commands.push(Command::Connect {
                peer: name.clone(),
                role: Role::Offerer,
            });
            commands.push(Command::CreateOffer { peer: name });
        }
        commands
    }

    fn handle_offer(&mut self, offer: SignalPayload) -> Result<Vec<Command>, MeetError> {
        if self.peers.contains_key(&offer.sender) {
            return Ok(Vec::new());
        }

        let description: SessionDescription = decode_payload(&offer.payload)?;
        if description.sdp_type != SdpType::Offer {
            return Err(MeetError::WrongDescription {
                peer: offer.sender,
                expected: "offer",
            });
        }

        let name = offer.sender;
        self.peers
            .insert(name.clone(), Peer::new(name.clone(), Role::Answerer));
        Ok(vec![
            Command::Connect {
                peer: name.clone(),
                role: Role::Answerer,
            },
            Command::AcceptOffer {
                peer: name,
                offer: description,
            },
        ])
    }

    fn handle_answer(&mut self, answer: SignalPayload) -> Result<Vec<Command>, MeetError> {
        let peer = self
            .peers
            .get(&answer.sender)
            .ok_or_else(|| MeetError::UnknownPeer(answer.sender.clone()))?;
        if peer.role != Role::Offerer
            || peer.phase != SignalingPhase::HaveLocalOffer
            || peer.has_remote_description()
        {
            return Err(MeetError::UnexpectedAnswer(answer.sender));
        }

        let description: SessionDescription = decode_payload(&answer.payload)?;
        if description.sdp_type != SdpType::Answer {
            return Err(MeetError::WrongDescription {
                peer: answer.sender,
                expected: "answer",
            });
        }

        Ok(vec![Command::ApplyAnswer {
            peer: answer.sender,
            answer: description,
        }])
    }

    fn handle_candidate(&mut self, candidate: SignalPayload) -> Result<Vec<Command>, MeetError> {
        let peer = self
            .peers
            .get_mut(&candidate.sender)
            .ok_or_else(|| MeetError::UnknownPeer(candidate.sender.clone()))?;
        let init: IceCandidateInit = decode_payload(&candidate.payload)?;

        if !peer.has_remote_description() {
            peer.buffer_remote(init);
            return Ok(Vec::new());
        }

        Ok(vec![Command::AddCandidate {
            peer: candidate.sender,
            candidate: init,
        }])
    }

    /// Our offer or answer for `peer` was created; returns the envelope to send.
    pub fn local_description(
        &mut self,
        peer_name: &str,
        description: SessionDescription,
    ) -> Result<Vec<Command>, MeetError> {
        let my_name = self.my_name.clone();
        let peer = self
            .peers
            .get_mut(peer_name)
            .ok_or_else(|| MeetError::UnknownPeer(peer_name.to_string()))?;

        let body = SignalPayload {
            sender: my_name,
            payload: encode_payload(&description)?,
        };
        let payload = match (peer.role, description.sdp_type) {
            (Role::Offerer, SdpType::Offer) => {
                peer.phase = SignalingPhase::HaveLocalOffer;
                MessagePayload::Offer(body)
            }
            (Role::Answerer, SdpType::Answer) => {
                peer.phase = SignalingPhase::Stable;
                MessagePayload::Answer(body)
            }
            (Role::Offerer, _) => {
                return Err(MeetError::WrongDescription {
                    peer: peer_name.to_string(),
                    expected: "offer",
                });
            }
            (Role::Answerer, _) => {
                return Err(MeetError::WrongDescription {
                    peer: peer_name.to_string(),
                    expected: "answer",
                });
            }
        };

        Ok(vec![Command::Send(WsMessage::new(peer_name, payload))])
    }

    /// The remote description for `peer` is in place. Releases every candidate
    /// that was waiting on it.
    pub fn remote_description_applied(
        &mut self,
        peer_name: &str,
    ) -> Result<Vec<Command>, MeetError> {
        let my_name = self.my_name.clone();
        let peer = self
            .peers
            .get_mut(peer_name)
            .ok_or_else(|| MeetError::UnknownPeer(peer_name.to_string()))?;

        peer.phase = match peer.role {
            Role::Offerer => SignalingPhase::Stable,
            Role::Answerer => SignalingPhase::HaveRemoteOffer,
        };
        let (remote, local) = peer.release_pending();

        let mut commands: Vec<Command> = remote
            .into_iter()
            .map(|candidate| Command::AddCandidate {
                peer: peer_name.to_string(),
                candidate,
            })
            .collect();
        for candidate in local {
            commands.push(candidate_envelope(&my_name, peer_name, &candidate)?);
            peer.ice.inc_sent();
        }
        Ok(commands)
    }

    /// A local ICE candidate was gathered for `peer`.
    pub fn local_candidate(
        &mut self,
        peer_name: &str,
        candidate: IceCandidateInit,
    ) -> Result<Vec<Command>, MeetError> {
        let my_name = self.my_name.clone();
        let peer = self
            .peers
            .get_mut(peer_name)
            .ok_or_else(|| MeetError::UnknownPeer(peer_name.to_string()))?;

        if !peer.has_remote_description() {
            peer.buffer_local(candidate);
            return Ok(Vec::new());
        }

        let command = candidate_envelope(&my_name, peer_name, &candidate)?;
        peer.ice.inc_sent();
        Ok(vec![command])
    }

    /// A remote candidate was accepted by the peer connection.
    pub fn candidate_added(&mut self, peer_name: &str) {
        if let Some(peer) = self.peers.get_mut(peer_name) {
            peer.ice.inc_received();
        }
    }

    pub fn remove_peer(&mut self, peer_name: &str) -> Option<Peer> {
        self.peers.remove(peer_name)
    }

    /// Drops every peer, returning their names.
    pub fn hangup(&mut self) -> Vec<String> {
        self.peers.drain().map(|(name, _)| name).collect()
    }
}

fn candidate_envelope(
    my_name: &str,
    peer_name: &str,
    candidate: &IceCandidateInit,
) -> Result<Command, MeetError> {
    Ok(Command::Send(WsMessage::new(
        peer_name,
        MessagePayload::Candidate(SignalPayload {
            sender: my_name.to_string(),
            payload: encode_payload(candidate)?,
        }),
    )))
}
