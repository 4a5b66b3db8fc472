use crate::integration::init_tracing;
use crate::utils::{TestClient, TestServer};

#[tokio::test]
async fn test_join_receives_roster() {
    init_tracing();
    let server = TestServer::spawn().await;

    let (mut alice, roster) = TestClient::join(&server, "lobby", "alice")
        .await
        .expect("alice failed to join");
    assert!(roster.is_empty(), "first participant sees an empty room");

    let (bob, roster) = TestClient::join(&server, "lobby", "bob")
        .await
        .expect("bob failed to join");
    assert_eq!(roster, vec!["alice".to_string()]);

    let (carol, roster) = TestClient::join(&server, "lobby", "carol")
        .await
        .expect("carol failed to join");
    assert_eq!(roster, vec!["alice".to_string(), "bob".to_string()]);

    // Other rooms are invisible.
    let (dave, roster) = TestClient::join(&server, "attic", "dave")
        .await
        .expect("dave failed to join");
    assert!(roster.is_empty());

    // Members already present are not notified of newcomers.
    alice.expect_silence().await.expect("alice got a frame");

    assert_eq!(server.state.rooms.roster("lobby"), vec!["alice", "bob", "carol"]);

    for client in [alice, bob, carol, dave] {
        client.close().await.expect("Failed to close client");
    }
}
