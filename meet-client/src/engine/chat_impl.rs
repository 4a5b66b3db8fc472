use std::cell::RefCell;
use std::rc::Rc;

use meet_core::ChatMessage;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{MessageEvent, RtcDataChannel, RtcDataChannelState, RtcDataChannelType};

use crate::MeetEngine;
use crate::engine::EngineInner;
use crate::logger::Logger;

impl MeetEngine {
    pub(super) fn setup_data_channel(
        inner: &Rc<RefCell<EngineInner>>,
        peer: &str,
        dc: RtcDataChannel,
    ) {
        dc.set_binary_type(RtcDataChannelType::Arraybuffer);

        let on_msg = {
            let inner = inner.clone();
            Closure::<dyn FnMut(MessageEvent)>::wrap(Box::new(move |ev: MessageEvent| {
                let Ok(ab) = ev.data().dyn_into::<js_sys::ArrayBuffer>() else {
                    return;
                };
                let bytes = js_sys::Uint8Array::new(&ab).to_vec();
                match ChatMessage::from_bytes(&bytes) {
                    Ok(msg) => {
                        if let Err(e) = inner.borrow().ui.append_chat(&msg) {
                            Logger::error(&e);
                        }
                    }
                    Err(e) => Logger::warn(&format!("Bad chat frame: {}", e)),
                }
            }))
        };
        dc.set_onmessage(Some(on_msg.as_ref().unchecked_ref()));
        on_msg.forget();

        let on_open = {
            let peer = peer.to_string();
            Closure::<dyn FnMut(JsValue)>::wrap(Box::new(move |_| {
                Logger::info(&format!("DataChannel to {} OPEN", peer));
            }))
        };
        dc.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        on_open.forget();

        let on_close = {
            let peer = peer.to_string();
            Closure::<dyn FnMut(JsValue)>::wrap(Box::new(move |_| {
                Logger::info(&format!("DataChannel to {} CLOSED", peer));
            }))
        };
        dc.set_onclose(Some(on_close.as_ref().unchecked_ref()));
        on_close.forget();

        if let Some(link) = inner.borrow_mut().links.get_mut(peer) {
            link.data_channel = Some(dc);
        }
    }

    /// Sends the chat input to every open channel and echoes it locally.
    pub(super) fn send_chat_from_input(inner: &Rc<RefCell<EngineInner>>) {
        let inner = inner.borrow();
        let Some(negotiator) = &inner.negotiator else {
            return;
        };
        let text = inner.ui.chat_input.value();
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        let msg = ChatMessage::new(negotiator.my_name(), text, js_sys::Date::now() as u64);
        let bytes = match msg.to_bytes() {
            Ok(bytes) => bytes,
            Err(e) => {
                Logger::warn(&format!("Failed to encode chat message: {}", e));
                return;
            }
        };

        for (peer, link) in &inner.links {
            let Some(dc) = &link.data_channel else {
                continue;
            };
            if dc.ready_state() != RtcDataChannelState::Open {
                Logger::warn(&format!("Chat channel to {} not open, skipping", peer));
                continue;
            }
            if let Err(e) = dc.send_with_u8_array(&bytes) {
                Logger::warn(&format!("Failed to send chat to {}: {:?}", peer, e));
            }
        }

        if let Err(e) = inner.ui.append_chat(&msg) {
            Logger::error(&e);
        }
        inner.ui.chat_input.set_value("");
    }
}
