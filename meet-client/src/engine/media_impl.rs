use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{MediaStream, MediaStreamConstraints, MediaStreamTrack};

use crate::MeetEngine;
use crate::engine::EngineInner;
use crate::engine::ui::window;
use crate::logger::Logger;

impl MeetEngine {
    pub(super) async fn acquire_local_media() -> Result<MediaStream, JsValue> {
        let devices = window()?.navigator().media_devices()?;

        let constraints = MediaStreamConstraints::new();
        constraints.set_audio(&JsValue::TRUE);
        constraints.set_video(&JsValue::TRUE);

        let stream = JsFuture::from(devices.get_user_media_with_constraints(&constraints)?)
            .await?
            .dyn_into::<MediaStream>()?;
        Logger::info(&format!(
            "Local media ready: {} track(s)",
            stream.get_tracks().length()
        ));
        Ok(stream)
    }

    pub(super) fn stop_stream(stream: &MediaStream) {
        for track in stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                track.stop();
            }
        }
    }

    /// Flips the first local audio track and relabels the mute button.
    pub(super) fn mute(inner: &Rc<RefCell<EngineInner>>) {
        let inner = inner.borrow();
        let Some(stream) = &inner.local_stream else {
            return;
        };
        let Ok(track) = stream.get_audio_tracks().get(0).dyn_into::<MediaStreamTrack>() else {
            Logger::warn("No local audio track to mute");
            return;
        };

        let muted = track.enabled();
        track.set_enabled(!muted);
        inner.ui.set_muted(muted);
        Logger::info(if muted { "Microphone muted" } else { "Microphone live" });
    }
}
