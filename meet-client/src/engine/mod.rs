use meet_core::{IceServerConfig, Negotiator, WsMessage};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlVideoElement, MediaStream, RtcDataChannel, RtcPeerConnection, WebSocket};

use crate::logger::Logger;

mod chat_impl;
mod create_pc_impl;
mod handle_signal_impl;
mod hangup_impl;
mod ice_config_impl;
mod media_impl;
mod run_commands_impl;
mod session;
mod start_impl;
pub(crate) mod ui;
mod ws_setup_impl;

use session::SessionEpoch;
use ui::Ui;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Browser-side handles for one remote participant. Negotiation state lives
/// in the [`Negotiator`].
struct PeerLink {
    pc: RtcPeerConnection,
    data_channel: Option<RtcDataChannel>,
    video: HtmlVideoElement,
}

struct EngineInner {
    state: ConnectionState,
    epoch: SessionEpoch,
    ui: Ui,
    ws: Option<WebSocket>,
    local_stream: Option<MediaStream>,
    negotiator: Option<Negotiator>,
    links: HashMap<String, PeerLink>,
    ice_servers: Vec<IceServerConfig>,
}

pub struct MeetEngine {
    inner: Rc<RefCell<EngineInner>>,
}

impl MeetEngine {
    pub fn new() -> Result<Self, JsValue> {
        let inner = Rc::new(RefCell::new(EngineInner {
            state: ConnectionState::Disconnected,
            epoch: SessionEpoch::default(),
            ui: Ui::bind()?,
            ws: None,
            local_stream: None,
            negotiator: None,
            links: HashMap::new(),
            ice_servers: Vec::new(),
        }));

        let engine = MeetEngine { inner };
        engine.bind_controls();
        Ok(engine)
    }

    pub fn state(&self) -> ConnectionState {
        self.inner.borrow().state
    }

    pub fn start(&self) {
        Self::spawn_start(self.inner.clone());
    }

    pub fn end_call(&self) {
        Self::hangup(&self.inner);
    }

    pub fn toggle_mute(&self) {
        Self::mute(&self.inner);
    }

    pub fn send_chat(&self) {
        Self::send_chat_from_input(&self.inner);
    }

    /// Per-peer candidate counters as a plain JS object.
    pub fn ice_stats(&self) -> Result<JsValue, JsValue> {
        let inner = self.inner.borrow();
        let stats = inner
            .negotiator
            .as_ref()
            .map(Negotiator::ice_stats)
            .unwrap_or_default();
        stats
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(JsValue::from)
    }

    fn bind_controls(&self) {
        let inner = self.inner.borrow();
        let ui = &inner.ui;

        let on_start = {
            let inner = self.inner.clone();
            Closure::<dyn FnMut()>::wrap(Box::new(move || Self::spawn_start(inner.clone())))
        };
        ui.start_button
            .set_onclick(Some(on_start.as_ref().unchecked_ref()));
        on_start.forget();

        let on_hangup = {
            let inner = self.inner.clone();
            Closure::<dyn FnMut()>::wrap(Box::new(move || Self::hangup(&inner)))
        };
        ui.hangup_button
            .set_onclick(Some(on_hangup.as_ref().unchecked_ref()));
        on_hangup.forget();

        let on_mute = {
            let inner = self.inner.clone();
            Closure::<dyn FnMut()>::wrap(Box::new(move || Self::mute(&inner)))
        };
        ui.mute_button
            .set_onclick(Some(on_mute.as_ref().unchecked_ref()));
        on_mute.forget();

        let on_chat = {
            let inner = self.inner.clone();
            Closure::<dyn FnMut()>::wrap(Box::new(move || Self::send_chat_from_input(&inner)))
        };
        ui.chat_button
            .set_onclick(Some(on_chat.as_ref().unchecked_ref()));
        on_chat.forget();
    }

    fn send_envelope(inner: &Rc<RefCell<EngineInner>>, msg: &WsMessage) {
        let json = match msg.to_json() {
            Ok(json) => json,
            Err(e) => {
                Logger::warn(&format!(
                    "Failed to encode {} for {}: {}",
                    msg.payload.kind(),
                    msg.recipient,
                    e
                ));
                return;
            }
        };

        match &inner.borrow().ws {
            Some(ws) if ws.ready_state() == WebSocket::OPEN => {
                Logger::info(&format!("sending {} to {}", msg.payload.kind(), msg.recipient));
                if let Err(e) = ws.send_with_str(&json) {
                    Logger::error(&e);
                }
            }
            _ => Logger::warn(&format!(
                "Signaling socket not open, dropping {} for {}",
                msg.payload.kind(),
                msg.recipient
            )),
        }
    }
}
