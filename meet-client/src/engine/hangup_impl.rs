use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::RtcRtpSender;

use crate::MeetEngine;
use crate::engine::{ConnectionState, EngineInner, PeerLink};
use crate::logger::Logger;

fn close_link(link: PeerLink) {
    for sender in link.pc.get_senders().iter() {
        if let Ok(sender) = sender.dyn_into::<RtcRtpSender>()
            && let Some(track) = sender.track()
        {
            track.stop();
        }
    }
    if let Some(dc) = link.data_channel {
        dc.close();
    }
    link.pc.close();
    link.video.remove();
}

impl MeetEngine {
    /// Ends the call: every peer connection, the local media and the
    /// signaling socket.
    pub(super) fn hangup(inner: &Rc<RefCell<EngineInner>>) {
        let mut inner = inner.borrow_mut();
        inner.epoch.advance();
        if inner.state == ConnectionState::Disconnected && inner.links.is_empty() {
            return;
        }
        Logger::info("Hanging up");

        if let Some(mut negotiator) = inner.negotiator.take() {
            negotiator.hangup();
        }
        for (name, link) in inner.links.drain() {
            Logger::info(&format!("hanging up {} connection", name));
            close_link(link);
        }
        inner.ui.clear_remote_videos();

        if let Some(stream) = inner.local_stream.take() {
            Self::stop_stream(&stream);
        }
        inner.ui.local_video.set_src_object(None);
        inner.ui.set_muted(false);
        inner.ui.set_in_call(false);

        inner.state = ConnectionState::Disconnected;
        if let Some(ws) = inner.ws.take() {
            let _ = ws.close();
        }
    }

    /// Forgets one peer whose connection failed or closed.
    pub(super) fn drop_peer(inner: &Rc<RefCell<EngineInner>>, peer: &str) {
        let mut inner = inner.borrow_mut();
        if let Some(negotiator) = inner.negotiator.as_mut() {
            negotiator.remove_peer(peer);
        }
        match inner.links.remove(peer) {
            Some(link) => {
                Logger::info(&format!("{} left the call", peer));
                close_link(link);
            }
            None => inner.ui.remove_remote_video(peer),
        }
    }
}
