use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{CloseEvent, MessageEvent, WebSocket};

use crate::MeetEngine;
use crate::engine::{ConnectionState, EngineInner};
use crate::logger::Logger;

impl MeetEngine {
    /// Opens the signaling socket for attempt `epoch`. Callbacks of a socket
    /// whose attempt has ended are ignored.
    pub(super) fn ws_setup(
        inner: &Rc<RefCell<EngineInner>>,
        epoch: u64,
        url: &str,
    ) -> Result<(), JsValue> {
        Logger::info(&format!("Connecting to {}", url));
        let ws = WebSocket::new(url)?;

        let onopen_callback = {
            let inner = inner.clone();
            Closure::<dyn FnMut(JsValue)>::wrap(Box::new(move |_| {
                let hello = {
                    let mut inner = inner.borrow_mut();
                    if !inner.epoch.is_current(epoch) {
                        return;
                    }
                    Logger::info("WS Open");
                    inner.state = ConnectionState::Connected;
                    inner.negotiator.as_ref().map(|n| n.echo())
                };
                if let Some(hello) = hello {
                    Self::send_envelope(&inner, &hello);
                }
            }))
        };
        ws.set_onopen(Some(onopen_callback.as_ref().unchecked_ref()));
        onopen_callback.forget();

        let onmessage_callback = {
            let inner = inner.clone();
            Closure::<dyn FnMut(MessageEvent)>::wrap(Box::new(move |e: MessageEvent| {
                if !inner.borrow().epoch.is_current(epoch) {
                    return;
                }
                if let Some(text) = e.data().as_string() {
                    Logger::debug(&format!("WS IN: {}", text));
                    Self::handle_signal(&inner, text);
                }
            }))
        };
        ws.set_onmessage(Some(onmessage_callback.as_ref().unchecked_ref()));
        onmessage_callback.forget();

        let onclose_callback = {
            let inner = inner.clone();
            Closure::<dyn FnMut(CloseEvent)>::wrap(Box::new(move |e: CloseEvent| {
                Logger::info(&format!("WS Closed ({}): {}", e.code(), e.reason()));
                // Only a socket the relay dropped ends the call here.
                let dropped_by_relay = {
                    let inner = inner.borrow();
                    inner.epoch.is_current(epoch) && inner.state != ConnectionState::Disconnected
                };
                if dropped_by_relay {
                    Self::hangup(&inner);
                }
            }))
        };
        ws.set_onclose(Some(onclose_callback.as_ref().unchecked_ref()));
        onclose_callback.forget();

        let onerror_callback = Closure::<dyn FnMut(JsValue)>::wrap(Box::new(move |e: JsValue| {
            Logger::warn(&format!("WS error: {:?}", e));
        }));
        ws.set_onerror(Some(onerror_callback.as_ref().unchecked_ref()));
        onerror_callback.forget();

        let replaced = inner.borrow_mut().ws.replace(ws);
        if let Some(old) = replaced {
            Logger::warn("Closing a leftover signaling socket");
            let _ = old.close();
        }
        Ok(())
    }
}
