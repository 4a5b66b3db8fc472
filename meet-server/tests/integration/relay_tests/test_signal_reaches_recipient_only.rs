use meet_core::utils::encode_payload;
use meet_core::{
    IceCandidateInit, MessagePayload, SessionDescription, SignalPayload, WsMessage,
};

use crate::integration::init_tracing;
use crate::utils::{TestClient, TestServer};

#[tokio::test]
async fn test_signal_reaches_recipient_only() {
    init_tracing();
    let server = TestServer::spawn().await;

    let (mut alice, _) = TestClient::join(&server, "lobby", "alice").await.unwrap();
    let (mut bob, _) = TestClient::join(&server, "lobby", "bob").await.unwrap();
    let (mut carol, _) = TestClient::join(&server, "lobby", "carol").await.unwrap();

    let offer = WsMessage::new(
        "alice",
        MessagePayload::Offer(SignalPayload {
            sender: "carol".into(),
            payload: encode_payload(&SessionDescription::offer("v=0")).unwrap(),
        }),
    );
    carol.send(&offer).await.unwrap();
    assert_eq!(alice.recv().await.unwrap(), offer);

    let candidate = WsMessage::new(
        "carol",
        MessagePayload::Candidate(SignalPayload {
            sender: "alice".into(),
            payload: encode_payload(&IceCandidateInit {
                candidate: "candidate:1 1 udp 1 10.0.0.1 9 typ host".into(),
                sdp_mid: Some("0".into()),
                sdp_m_line_index: Some(0),
                username_fragment: None,
            })
            .unwrap(),
        }),
    );
    alice.send(&candidate).await.unwrap();
    assert_eq!(carol.recv().await.unwrap(), candidate);

    bob.expect_silence().await.expect("bob should not see other pairs' traffic");

    for client in [alice, bob, carol] {
        client.close().await.unwrap();
    }
}
