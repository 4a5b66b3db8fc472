use anyhow::{Context, Result, bail};
use futures::{SinkExt, StreamExt};
use meet_core::WsMessage;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use super::test_server::TestServer;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Signaling socket speaking the browser client's JSON envelopes.
pub struct TestClient {
    pub name: String,
    ws: WsStream,
}

impl TestClient {
    pub async fn connect(server: &TestServer, room: &str, name: &str) -> Result<Self> {
        let (ws, _) = connect_async(server.ws_url(room, name))
            .await
            .with_context(|| format!("Failed to connect {name} to {room}"))?;
        Ok(Self {
            name: name.to_string(),
            ws,
        })
    }

    /// Connects and consumes the roster the relay sends on join.
    pub async fn join(server: &TestServer, room: &str, name: &str) -> Result<(Self, Vec<String>)> {
        let mut client = Self::connect(server, room, name).await?;
        let roster = client.recv().await?;
        match roster.payload {
            meet_core::MessagePayload::Peers(p) => Ok((client, p.names)),
            other => bail!("Expected roster first, got {:?}", other),
        }
    }

    pub async fn send(&mut self, msg: &WsMessage) -> Result<()> {
        self.send_raw(&msg.to_json()?).await
    }

    pub async fn send_raw(&mut self, text: &str) -> Result<()> {
        self.ws
            .send(Message::Text(text.to_string().into()))
            .await
            .context("Failed to send frame")
    }

    pub async fn recv(&mut self) -> Result<WsMessage> {
        match self.recv_within(super::SIGNAL_TIMEOUT_MS).await? {
            Some(msg) => Ok(msg),
            None => bail!("Timeout waiting for a frame on {}", self.name),
        }
    }

    /// Next envelope, or `None` if nothing arrives within `timeout_ms`.
    pub async fn recv_within(&mut self, timeout_ms: u64) -> Result<Option<WsMessage>> {
        let deadline = tokio::time::Instant::now() + Duration::from_millis(timeout_ms);
        loop {
            let frame = match tokio::time::timeout_at(deadline, self.ws.next()).await {
                Ok(frame) => frame,
                Err(_) => return Ok(None),
            };
            match frame {
                Some(Ok(Message::Text(text))) => {
                    return Ok(Some(WsMessage::from_json(text.as_str())?));
                }
                Some(Ok(Message::Close(_))) | None => bail!("Socket of {} closed", self.name),
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(e.into()),
            }
        }
    }

    pub async fn expect_silence(&mut self) -> Result<()> {
        if let Some(msg) = self.recv_within(super::SILENCE_WINDOW_MS).await? {
            bail!("{} unexpectedly received {:?}", self.name, msg);
        }
        Ok(())
    }

    pub async fn close(mut self) -> Result<()> {
        self.ws.close(None).await?;
        Ok(())
    }
}

/// HTTP status of a refused WebSocket handshake, `None` if it was accepted.
pub async fn handshake_status(server: &TestServer, room: &str, name: &str) -> Option<u16> {
    match connect_async(server.ws_url(room, name)).await {
        Ok(_) => None,
        Err(tungstenite::Error::Http(response)) => Some(response.status().as_u16()),
        Err(e) => panic!("Unexpected handshake error: {e}"),
    }
}
