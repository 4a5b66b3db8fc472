use meet_core::IceServerConfig;
use meet_server::{AppState, router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// A relay bound to an ephemeral localhost port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub state: Arc<AppState>,
}

impl TestServer {
    pub async fn spawn() -> Self {
        let state = Arc::new(AppState::new(vec![IceServerConfig::stun(
            "stun:stun.example.org:3478",
        )]));
        let app = router(state.clone(), None);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("No local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        Self { addr, state }
    }

    pub fn ws_url(&self, room: &str, name: &str) -> String {
        format!("ws://{}/ws/{}/{}", self.addr, room, name)
    }
}
