use std::cell::RefCell;
use std::rc::Rc;

use meet_core::Negotiator;
use wasm_bindgen::JsValue;

use crate::MeetEngine;
use crate::engine::ui::window;
use crate::engine::{ConnectionState, EngineInner};
use crate::logger::Logger;

fn signaling_url(room: &str, name: &str) -> Result<String, JsValue> {
    let location = window()?.location();
    let scheme = if location.protocol()? == "https:" {
        "wss"
    } else {
        "ws"
    };
    let room: String = js_sys::encode_uri_component(room).into();
    let name: String = js_sys::encode_uri_component(name).into();
    Ok(format!("{scheme}://{}/ws/{room}/{name}", location.host()?))
}

struct StartRequest {
    epoch: u64,
    name: String,
    room: String,
}

impl MeetEngine {
    pub(super) fn spawn_start(inner: Rc<RefCell<EngineInner>>) {
        let Some(request) = Self::begin_session(&inner) else {
            return;
        };
        let epoch = request.epoch;

        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = Self::start_session(inner.clone(), request).await {
                Logger::error(&e);
                if inner.borrow().epoch.is_current(epoch) {
                    Self::hangup(&inner);
                }
            }
        });
    }

    fn begin_session(inner: &Rc<RefCell<EngineInner>>) -> Option<StartRequest> {
        let mut inner = inner.borrow_mut();
        if inner.state != ConnectionState::Disconnected {
            return None;
        }
        let name = inner.ui.name_input.value().trim().to_string();
        let room = inner.ui.room_input.value().trim().to_string();
        if name.is_empty() || room.is_empty() {
            Logger::warn("Name and room are required");
            return None;
        }

        inner.state = ConnectionState::Connecting;
        inner.ui.set_in_call(true);
        Some(StartRequest {
            epoch: inner.epoch.advance(),
            name,
            room,
        })
    }

    /// Acquires camera and microphone, resolves ICE servers and opens the
    /// signaling socket. Returns early once the attempt is no longer current.
    async fn start_session(
        inner: Rc<RefCell<EngineInner>>,
        request: StartRequest,
    ) -> Result<(), JsValue> {
        let StartRequest { epoch, name, room } = request;

        Logger::info("Requesting local stream");
        let stream = Self::acquire_local_media().await?;
        if !inner.borrow().epoch.is_current(epoch) {
            Logger::info("Start abandoned, releasing its media");
            Self::stop_stream(&stream);
            return Ok(());
        }
        {
            let mut inner = inner.borrow_mut();
            inner.ui.local_video.set_src_object(Some(&stream));
            inner.local_stream = Some(stream);
        }

        let ice_servers = Self::ice_servers().await;
        // A hangup in between already stopped the stream stored above.
        if !inner.borrow().epoch.is_current(epoch) {
            return Ok(());
        }
        {
            let mut inner = inner.borrow_mut();
            inner.ice_servers = ice_servers;
            inner.negotiator = Some(Negotiator::new(name.clone()));
        }

        Self::ws_setup(&inner, epoch, &signaling_url(&room, &name)?)
    }
}
