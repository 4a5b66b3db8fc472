use meet_core::{MessagePayload, SignalPayload, WsMessage};

use crate::integration::init_tracing;
use crate::utils::{TestClient, TestServer};

#[tokio::test]
async fn test_spoofed_sender_dropped() {
    init_tracing();
    let server = TestServer::spawn().await;

    let (mut alice, _) = TestClient::join(&server, "lobby", "alice").await.unwrap();
    let (mut bob, _) = TestClient::join(&server, "lobby", "bob").await.unwrap();

    let forged = WsMessage::new(
        "alice",
        MessagePayload::Answer(SignalPayload {
            sender: "carol".into(),
            payload: "e30=".into(),
        }),
    );
    bob.send(&forged).await.unwrap();
    alice.expect_silence().await.expect("forged answer must not be relayed");

    // The socket stays usable afterwards.
    let genuine = WsMessage::new(
        "alice",
        MessagePayload::Answer(SignalPayload {
            sender: "bob".into(),
            payload: "e30=".into(),
        }),
    );
    bob.send(&genuine).await.unwrap();
    assert_eq!(alice.recv().await.unwrap(), genuine);

    alice.close().await.unwrap();
    bob.close().await.unwrap();
}
