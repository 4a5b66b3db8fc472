use meet_core::{EchoPayload, MessagePayload, PeersPayload, WsMessage};

use crate::integration::init_tracing;
use crate::utils::{TestClient, TestServer};

#[tokio::test]
async fn test_client_roster_dropped() {
    init_tracing();
    let server = TestServer::spawn().await;

    let (mut alice, _) = TestClient::join(&server, "lobby", "alice").await.unwrap();
    let (mut bob, _) = TestClient::join(&server, "lobby", "bob").await.unwrap();

    let forged = WsMessage::new(
        "alice",
        MessagePayload::Peers(PeersPayload {
            names: vec!["mallory".into(), "trent".into()],
        }),
    );
    bob.send(&forged).await.unwrap();
    alice
        .expect_silence()
        .await
        .expect("a roster from a client must not be relayed");

    let hello = WsMessage::new(
        "bob",
        MessagePayload::Echo(EchoPayload {
            message: "hello".into(),
        }),
    );
    bob.send(&hello).await.unwrap();
    assert_eq!(bob.recv().await.unwrap(), hello);

    alice.close().await.unwrap();
    bob.close().await.unwrap();
}
