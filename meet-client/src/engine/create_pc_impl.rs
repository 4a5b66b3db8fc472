use std::cell::RefCell;
use std::rc::Rc;

use meet_core::utils::CHAT_CHANNEL_LABEL;
use meet_core::{IceCandidateInit, Role};
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;
use web_sys::{
    MediaStream, MediaStreamTrack, RtcConfiguration, RtcDataChannelEvent, RtcIceServer,
    RtcPeerConnection, RtcPeerConnectionIceEvent, RtcPeerConnectionState, RtcTrackEvent,
};

use crate::MeetEngine;
use crate::engine::{EngineInner, PeerLink};
use crate::logger::Logger;

impl MeetEngine {
    /// Opens the connection to `peer`, wires its callbacks, adds the local
    /// tracks and sets up the chat channel for `role`.
    pub(super) fn create_pc(
        inner: &Rc<RefCell<EngineInner>>,
        peer: &str,
        role: Role,
    ) -> Result<(), JsValue> {
        Logger::info(&format!("creating {:?} connection with {}", role, peer));

        let rtc_config = RtcConfiguration::new();
        let ice_servers_arr = js_sys::Array::new();
        for server_config in &inner.borrow().ice_servers {
            let rtc_ice_server = RtcIceServer::new();

            let urls = js_sys::Array::new();
            for url in &server_config.urls {
                urls.push(&JsValue::from_str(url));
            }
            rtc_ice_server.set_urls(&urls);

            if let Some(username) = &server_config.username {
                rtc_ice_server.set_username(username);
            }
            if let Some(credential) = &server_config.credential {
                rtc_ice_server.set_credential(credential);
            }

            ice_servers_arr.push(&rtc_ice_server);
        }
        rtc_config.set_ice_servers(&ice_servers_arr);

        let pc = RtcPeerConnection::new_with_configuration(&rtc_config)?;
        let video = inner.borrow().ui.remote_video(peer)?;

        let onice = {
            let inner = inner.clone();
            let peer = peer.to_string();
            Closure::wrap(Box::new(move |ev: RtcPeerConnectionIceEvent| {
                let Some(candidate) = ev.candidate() else {
                    return;
                };
                let init = IceCandidateInit {
                    candidate: candidate.candidate(),
                    sdp_mid: candidate.sdp_mid(),
                    sdp_m_line_index: candidate.sdp_m_line_index(),
                    username_fragment: js_sys::Reflect::get(&candidate, &"usernameFragment".into())
                        .ok()
                        .and_then(|v| v.as_string()),
                };
                match Self::with_negotiator(&inner, |n| n.local_candidate(&peer, init)) {
                    Ok(commands) => {
                        let inner = inner.clone();
                        wasm_bindgen_futures::spawn_local(async move {
                            Self::run_commands(inner, commands).await;
                        });
                    }
                    Err(e) => Logger::warn(&format!("Dropping local candidate: {:?}", e)),
                }
            }) as Box<dyn FnMut(RtcPeerConnectionIceEvent)>)
        };
        pc.set_onicecandidate(Some(onice.as_ref().unchecked_ref()));
        onice.forget();

        let ontrack = {
            let video = video.clone();
            let peer = peer.to_string();
            Closure::wrap(Box::new(move |ev: RtcTrackEvent| {
                if let Ok(stream) = ev.streams().get(0).dyn_into::<MediaStream>() {
                    Logger::info(&format!("Remote stream from {} attached", peer));
                    video.set_src_object(Some(&stream));
                }
            }) as Box<dyn FnMut(RtcTrackEvent)>)
        };
        pc.set_ontrack(Some(ontrack.as_ref().unchecked_ref()));
        ontrack.forget();

        let onstate = {
            let inner = inner.clone();
            let pc = pc.clone();
            let peer = peer.to_string();
            Closure::<dyn FnMut(JsValue)>::wrap(Box::new(move |_| {
                let state = pc.connection_state();
                Logger::info(&format!("Connection with {}: {:?}", peer, state));
                if matches!(
                    state,
                    RtcPeerConnectionState::Failed | RtcPeerConnectionState::Closed
                ) {
                    Self::drop_peer(&inner, &peer);
                }
            }))
        };
        pc.set_onconnectionstatechange(Some(onstate.as_ref().unchecked_ref()));
        onstate.forget();

        if let Some(stream) = &inner.borrow().local_stream {
            for track in stream.get_tracks().iter() {
                let track = track.dyn_into::<MediaStreamTrack>()?;
                pc.add_track_0(&track, stream);
            }
        }

        inner.borrow_mut().links.insert(
            peer.to_string(),
            PeerLink {
                pc: pc.clone(),
                data_channel: None,
                video,
            },
        );

        match role {
            Role::Offerer => {
                let dc = pc.create_data_channel(CHAT_CHANNEL_LABEL);
                Self::setup_data_channel(inner, peer, dc);
            }
            Role::Answerer => {
                let ondatachannel = {
                    let inner = inner.clone();
                    let peer = peer.to_string();
                    Closure::wrap(Box::new(move |ev: RtcDataChannelEvent| {
                        let dc = ev.channel();
                        Logger::info(&format!("Received DataChannel {} from {}", dc.label(), peer));
                        Self::setup_data_channel(&inner, &peer, dc);
                    }) as Box<dyn FnMut(RtcDataChannelEvent)>)
                };
                pc.set_ondatachannel(Some(ondatachannel.as_ref().unchecked_ref()));
                ondatachannel.forget();
            }
        }

        Ok(())
    }
}
