use meet_core::Role;

use crate::integration::init_tracing;
use crate::utils::{
    NEGOTIATION_TIMEOUT_MS, RtcTestPeer, SIGNAL_TIMEOUT_MS, TestClient, TestServer, wait_until,
};

async fn wait_for_member(server: &TestServer, name: &'static str) {
    let rooms = server.state.rooms.clone();
    let joined = wait_until(SIGNAL_TIMEOUT_MS, || {
        let rooms = rooms.clone();
        async move { rooms.is_taken("lobby", name) }
    })
    .await;
    assert!(joined, "{name} never joined the room");
}

#[tokio::test]
async fn test_three_peers_mesh() {
    init_tracing();
    let server = TestServer::spawn().await;

    // Each newcomer's roster holds everyone already present.
    let alice_client = TestClient::connect(&server, "lobby", "alice").await.unwrap();
    let mut alice = RtcTestPeer::new(alice_client);
    wait_for_member(&server, "alice").await;

    let bob_client = TestClient::connect(&server, "lobby", "bob").await.unwrap();
    let mut bob = RtcTestPeer::new(bob_client);
    wait_for_member(&server, "bob").await;

    let carol_client = TestClient::connect(&server, "lobby", "carol").await.unwrap();
    let mut carol = RtcTestPeer::new(carol_client);

    let (alice_res, bob_res, carol_res) = tokio::join!(
        alice.drive_until_stable_with_all(&["bob", "carol"], NEGOTIATION_TIMEOUT_MS),
        bob.drive_until_stable_with_all(&["alice", "carol"], NEGOTIATION_TIMEOUT_MS),
        carol.drive_until_stable_with_all(&["alice", "bob"], NEGOTIATION_TIMEOUT_MS),
    );
    alice_res.expect("alice did not settle with both peers");
    bob_res.expect("bob did not settle with both peers");
    carol_res.expect("carol did not settle with both peers");

    assert_eq!(alice.negotiator.peer_names(), vec!["bob", "carol"]);
    assert_eq!(bob.negotiator.peer_names(), vec!["alice", "carol"]);
    assert_eq!(carol.negotiator.peer_names(), vec!["alice", "bob"]);

    let role = |peer: &RtcTestPeer, other: &str| peer.negotiator.peer(other).unwrap().role;

    assert_eq!(role(&bob, "alice"), Role::Offerer);
    assert_eq!(role(&carol, "alice"), Role::Offerer);
    assert_eq!(role(&carol, "bob"), Role::Offerer);

    // Exactly one offerer per pair.
    for (a, b) in [(&alice, &bob), (&alice, &carol), (&bob, &carol)] {
        let a_role = role(a, b.client.name.as_str());
        let b_role = role(b, a.client.name.as_str());
        assert_ne!(a_role, b_role, "{} and {} share a role", a.client.name, b.client.name);
    }

    for peer in [alice, bob, carol] {
        peer.close().await.unwrap();
    }
}
