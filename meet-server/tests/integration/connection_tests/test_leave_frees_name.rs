use crate::integration::init_tracing;
use crate::utils::{SIGNAL_TIMEOUT_MS, TestClient, TestServer, wait_until};

#[tokio::test]
async fn test_leave_frees_name() {
    init_tracing();
    let server = TestServer::spawn().await;

    let (alice, _) = TestClient::join(&server, "lobby", "alice")
        .await
        .expect("alice failed to join");
    let (bob, _) = TestClient::join(&server, "lobby", "bob")
        .await
        .expect("bob failed to join");

    alice.close().await.expect("Failed to close alice");

    let rooms = server.state.rooms.clone();
    let left = wait_until(SIGNAL_TIMEOUT_MS, || {
        let rooms = rooms.clone();
        async move { !rooms.is_taken("lobby", "alice") }
    })
    .await;
    assert!(left, "alice should be removed after closing");
    assert_eq!(server.state.rooms.roster("lobby"), vec!["bob"]);

    // A reconnect under the same name sees bob.
    let (alice_again, roster) = TestClient::join(&server, "lobby", "alice")
        .await
        .expect("alice failed to rejoin");
    assert_eq!(roster, vec!["bob".to_string()]);

    bob.close().await.expect("Failed to close bob");
    alice_again.close().await.expect("Failed to close alice");

    let empty = wait_until(SIGNAL_TIMEOUT_MS, || {
        let rooms = rooms.clone();
        async move { rooms.room_count() == 0 }
    })
    .await;
    assert!(empty, "empty room should be dropped");
}
