use wasm_bindgen::prelude::*;

mod engine;
mod logger;

pub use engine::{ConnectionState, MeetEngine};

#[wasm_bindgen(start)]
pub fn main_js() {
    console_error_panic_hook::set_once();
}

/// Page-level handle. Binds to the controls in `index.html` on construction.
#[wasm_bindgen]
pub struct MeetApp {
    engine: MeetEngine,
}

#[wasm_bindgen]
impl MeetApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<MeetApp, JsValue> {
        Ok(MeetApp {
            engine: MeetEngine::new()?,
        })
    }

    pub fn start(&self) {
        self.engine.start();
    }

    pub fn hangup(&self) {
        self.engine.end_call();
    }

    pub fn mute(&self) {
        self.engine.toggle_mute();
    }

    #[wasm_bindgen(js_name = sendChat)]
    pub fn send_chat(&self) {
        self.engine.send_chat();
    }

    /// `{ peerName: { sent, received } }` for the current call.
    #[wasm_bindgen(js_name = iceStats)]
    pub fn ice_stats(&self) -> Result<JsValue, JsValue> {
        self.engine.ice_stats()
    }

    #[wasm_bindgen(getter)]
    pub fn connected(&self) -> bool {
        self.engine.state() == ConnectionState::Connected
    }
}
