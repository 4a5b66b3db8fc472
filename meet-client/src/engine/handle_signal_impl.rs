use std::cell::RefCell;
use std::rc::Rc;

use meet_core::{MessagePayload, WsMessage};

use crate::MeetEngine;
use crate::engine::EngineInner;
use crate::logger::Logger;

impl MeetEngine {
    pub(super) fn handle_signal(inner: &Rc<RefCell<EngineInner>>, text: String) {
        let msg = match WsMessage::from_json(&text) {
            Ok(m) => m,
            Err(e) => {
                Logger::warn(&format!("failed to parse event data: {}. Text: {}", e, text));
                return;
            }
        };

        match &msg.payload {
            MessagePayload::Peers(p) => Logger::info(&format!("Room roster: {:?}", p.names)),
            MessagePayload::File(f) => Logger::info(&format!(
                "{} announced file {} ({} bytes)",
                f.sender, f.file_name, f.file_size
            )),
            other => Logger::info(&format!(
                "Received {} from {}",
                other.kind(),
                other.sender().unwrap_or("?")
            )),
        }

        let result = {
            let mut inner = inner.borrow_mut();
            match inner.negotiator.as_mut() {
                Some(negotiator) => negotiator.handle(msg),
                None => return,
            }
        };

        match result {
            Ok(commands) if commands.is_empty() => {}
            Ok(commands) => {
                let inner = inner.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    Self::run_commands(inner, commands).await;
                });
            }
            Err(e) => Logger::warn(&format!("Ignoring signal: {}", e)),
        }
    }
}
