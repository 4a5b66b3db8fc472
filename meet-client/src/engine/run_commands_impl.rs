use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use meet_core::{Command, MeetError, Negotiator, SessionDescription};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{RtcIceCandidateInit, RtcPeerConnection, RtcSdpType, RtcSessionDescriptionInit};

use crate::MeetEngine;
use crate::engine::EngineInner;
use crate::logger::Logger;

fn sdp_of(description: &JsValue) -> Result<String, JsValue> {
    js_sys::Reflect::get(description, &"sdp".into())?
        .as_string()
        .ok_or_else(|| JsValue::from_str("session description without sdp"))
}

fn description_init(sdp_type: RtcSdpType, sdp: &str) -> RtcSessionDescriptionInit {
    let init = RtcSessionDescriptionInit::new(sdp_type);
    init.set_sdp(sdp);
    init
}

impl MeetEngine {
    /// Executes negotiator commands in order. Commands produced while running
    /// one are queued behind the rest.
    pub(super) async fn run_commands(inner: Rc<RefCell<EngineInner>>, commands: Vec<Command>) {
        let mut queue: VecDeque<Command> = commands.into();

        while let Some(command) = queue.pop_front() {
            let (kind, peer) = (command.kind(), command.peer().to_string());
            Logger::debug(&format!("running {} for {}", kind, peer));
            match Self::run_command(&inner, command).await {
                Ok(follow_up) => queue.extend(follow_up),
                Err(e) => {
                    Logger::warn(&format!("{} for {} failed", kind, peer));
                    Logger::error(&e);
                }
            }
        }
    }

    // No RefCell borrow may be held across an await in here.
    async fn run_command(
        inner: &Rc<RefCell<EngineInner>>,
        command: Command,
    ) -> Result<Vec<Command>, JsValue> {
        match command {
            Command::Connect { peer, role } => {
                Self::create_pc(inner, &peer, role)?;
                Ok(Vec::new())
            }
            Command::CreateOffer { peer } => {
                let pc = Self::pc_for(inner, &peer)?;
                let offer = sdp_of(&JsFuture::from(pc.create_offer()).await?)?;
                JsFuture::from(pc.set_local_description(&description_init(RtcSdpType::Offer, &offer)))
                    .await?;
                Logger::info(&format!("Sending OFFER to {}", peer));
                Self::with_negotiator(inner, |n| {
                    n.local_description(&peer, SessionDescription::offer(offer))
                })
            }
            Command::AcceptOffer { peer, offer } => {
                let pc = Self::pc_for(inner, &peer)?;
                JsFuture::from(
                    pc.set_remote_description(&description_init(RtcSdpType::Offer, &offer.sdp)),
                )
                .await?;
                let mut commands = Self::with_negotiator(inner, |n| n.remote_description_applied(&peer))?;

                let answer = sdp_of(&JsFuture::from(pc.create_answer()).await?)?;
                JsFuture::from(pc.set_local_description(&description_init(RtcSdpType::Answer, &answer)))
                    .await?;
                Logger::info(&format!("Sending ANSWER to {}", peer));
                commands.extend(Self::with_negotiator(inner, |n| {
                    n.local_description(&peer, SessionDescription::answer(answer))
                })?);
                Ok(commands)
            }
            Command::ApplyAnswer { peer, answer } => {
                let pc = Self::pc_for(inner, &peer)?;
                JsFuture::from(
                    pc.set_remote_description(&description_init(RtcSdpType::Answer, &answer.sdp)),
                )
                .await?;
                Logger::info(&format!("Remote description set (Answer from {})", peer));
                Self::with_negotiator(inner, |n| n.remote_description_applied(&peer))
            }
            Command::AddCandidate { peer, candidate } => {
                let pc = Self::pc_for(inner, &peer)?;
                let init = RtcIceCandidateInit::new(&candidate.candidate);
                init.set_sdp_mid(candidate.sdp_mid.as_deref());
                init.set_sdp_m_line_index(candidate.sdp_m_line_index);
                if let Some(u) = candidate.username_fragment.as_deref() {
                    let _ = js_sys::Reflect::set(&init, &"usernameFragment".into(), &u.into());
                }

                let promise = pc.add_ice_candidate_with_opt_rtc_ice_candidate_init(Some(&init));
                match JsFuture::from(promise).await {
                    Ok(_) => {
                        if let Some(n) = inner.borrow_mut().negotiator.as_mut() {
                            n.candidate_added(&peer);
                        }
                    }
                    Err(e) => Logger::warn(&format!("Error adding ICE from {}: {:?}", peer, e)),
                }
                Ok(Vec::new())
            }
            Command::Send(msg) => {
                Self::send_envelope(inner, &msg);
                Ok(Vec::new())
            }
        }
    }

    pub(super) fn pc_for(
        inner: &Rc<RefCell<EngineInner>>,
        peer: &str,
    ) -> Result<RtcPeerConnection, JsValue> {
        inner
            .borrow()
            .links
            .get(peer)
            .map(|link| link.pc.clone())
            .ok_or_else(|| JsValue::from_str(&format!("no peer connection for {peer}")))
    }

    pub(super) fn with_negotiator<R>(
        inner: &Rc<RefCell<EngineInner>>,
        f: impl FnOnce(&mut Negotiator) -> Result<R, MeetError>,
    ) -> Result<R, JsValue> {
        let mut inner = inner.borrow_mut();
        let negotiator = inner
            .negotiator
            .as_mut()
            .ok_or_else(|| JsValue::from_str("call already ended"))?;
        f(negotiator).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
