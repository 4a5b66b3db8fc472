use meet_core::utils::ICE_SERVERS_PATH;
use meet_core::{IceServerConfig, default_ice_servers};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::MeetEngine;
use crate::engine::ui::window;
use crate::logger::Logger;

impl MeetEngine {
    async fn fetch_ice_servers() -> Result<Vec<IceServerConfig>, JsValue> {
        let response = JsFuture::from(window()?.fetch_with_str(ICE_SERVERS_PATH))
            .await?
            .dyn_into::<Response>()?;
        if !response.ok() {
            return Err(JsValue::from_str(&format!(
                "{} answered {}",
                ICE_SERVERS_PATH,
                response.status()
            )));
        }

        let body = JsFuture::from(response.text()?)
            .await?
            .as_string()
            .ok_or_else(|| JsValue::from_str("ICE server list is not text"))?;
        serde_json::from_str(&body).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// The relay's ICE server list, or the public STUN defaults when it is
    /// unreachable or empty.
    pub(super) async fn ice_servers() -> Vec<IceServerConfig> {
        match Self::fetch_ice_servers().await {
            Ok(servers) if !servers.is_empty() => {
                Logger::info(&format!("Received ICE Config: {} servers", servers.len()));
                servers
            }
            Ok(_) => default_ice_servers(),
            Err(e) => {
                Logger::warn(&format!("Falling back to default STUN servers: {:?}", e));
                default_ice_servers()
            }
        }
    }
}
