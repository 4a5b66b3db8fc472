use meet_core::{Role, SignalingPhase};

use crate::integration::init_tracing;
use crate::utils::{NEGOTIATION_TIMEOUT_MS, RtcTestPeer, TestClient, TestServer};

#[tokio::test]
async fn test_native_peers_negotiate() {
    init_tracing();
    let server = TestServer::spawn().await;

    // bob is already in the room; alice gets him in her roster and offers.
    let (bob_client, _) = TestClient::join(&server, "lobby", "bob").await.unwrap();
    let mut bob = RtcTestPeer::new(bob_client);
    let alice_client = TestClient::connect(&server, "lobby", "alice").await.unwrap();
    let mut alice = RtcTestPeer::new(alice_client);

    let (alice_res, bob_res) = tokio::join!(
        alice.drive_until_stable("bob", NEGOTIATION_TIMEOUT_MS),
        bob.drive_until_stable("alice", NEGOTIATION_TIMEOUT_MS),
    );
    alice_res.expect("alice did not finish negotiating");
    bob_res.expect("bob did not finish negotiating");

    let alice_view = alice.negotiator.peer("bob").expect("alice has no record of bob");
    assert_eq!(alice_view.role, Role::Offerer);
    assert_eq!(alice_view.phase, SignalingPhase::Stable);
    assert!(alice_view.has_remote_description());

    let bob_view = bob.negotiator.peer("alice").expect("bob has no record of alice");
    assert_eq!(bob_view.role, Role::Answerer);
    assert_eq!(bob_view.phase, SignalingPhase::Stable);

    assert!(alice.connection("bob").unwrap().remote_description().await.is_some());
    assert!(bob.connection("alice").unwrap().local_description().await.is_some());

    // Exactly one record per remote name.
    assert_eq!(alice.negotiator.peer_names(), vec!["bob".to_string()]);
    assert_eq!(bob.negotiator.peer_names(), vec!["alice".to_string()]);

    alice.close().await.unwrap();
    bob.close().await.unwrap();
}
