use meet_core::ChatMessage;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, HtmlButtonElement, HtmlElement, HtmlInputElement, HtmlVideoElement, Window,
};

pub(crate) fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

fn element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("#{id} has an unexpected element type")))
}

fn remote_video_id(peer: &str) -> String {
    format!("remoteVideo{peer}")
}

/// Handles to the page's fixed controls.
pub(crate) struct Ui {
    document: Document,
    pub start_button: HtmlButtonElement,
    pub hangup_button: HtmlButtonElement,
    pub mute_button: HtmlButtonElement,
    pub chat_button: HtmlButtonElement,
    pub name_input: HtmlInputElement,
    pub room_input: HtmlInputElement,
    pub chat_input: HtmlInputElement,
    pub local_video: HtmlVideoElement,
    chat_log: HtmlElement,
    remote_peers: HtmlElement,
}

impl Ui {
    pub fn bind() -> Result<Self, JsValue> {
        let document = window()?
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let ui = Self {
            start_button: element(&document, "startButton")?,
            hangup_button: element(&document, "hangupButton")?,
            mute_button: element(&document, "muteButton")?,
            chat_button: element(&document, "chatButton")?,
            name_input: element(&document, "name")?,
            room_input: element(&document, "room")?,
            chat_input: element(&document, "chatInput")?,
            local_video: element(&document, "localVideo")?,
            chat_log: element(&document, "chat")?,
            remote_peers: element(&document, "remotePeers")?,
            document,
        };
        ui.set_in_call(false);
        Ok(ui)
    }

    pub fn set_in_call(&self, in_call: bool) {
        self.start_button.set_disabled(in_call);
        self.hangup_button.set_disabled(!in_call);
        self.mute_button.set_disabled(!in_call);
        self.chat_button.set_disabled(!in_call);
        self.name_input.set_disabled(in_call);
        self.room_input.set_disabled(in_call);
    }

    pub fn set_muted(&self, muted: bool) {
        self.mute_button
            .set_inner_text(if muted { "Unmute" } else { "Mute" });
    }

    /// Returns the `<video>` for `peer`, creating it under `#remotePeers` on
    /// first use.
    pub fn remote_video(&self, peer: &str) -> Result<HtmlVideoElement, JsValue> {
        let id = remote_video_id(peer);
        if let Some(existing) = self.document.get_element_by_id(&id) {
            return existing.dyn_into::<HtmlVideoElement>().map_err(JsValue::from);
        }

        let video = self
            .document
            .create_element("video")?
            .dyn_into::<HtmlVideoElement>()?;
        video.set_id(&id);
        video.set_autoplay(true);
        video.set_attribute("playsinline", "")?;
        self.remote_peers.append_child(&video)?;
        Ok(video)
    }

    pub fn remove_remote_video(&self, peer: &str) {
        if let Some(el) = self.document.get_element_by_id(&remote_video_id(peer)) {
            el.remove();
        }
    }

    pub fn clear_remote_videos(&self) {
        self.remote_peers.set_inner_html("");
    }

    pub fn append_chat(&self, msg: &ChatMessage) -> Result<(), JsValue> {
        let line = self.document.create_element("div")?;
        line.set_text_content(Some(&format!("{}: {}", msg.sender, msg.msg)));
        self.chat_log.append_child(&line)?;
        Ok(())
    }
}
