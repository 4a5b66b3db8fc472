use crate::integration::init_tracing;
use crate::utils::{TestClient, TestServer, handshake_status};

#[tokio::test]
async fn test_duplicate_name_rejected() {
    init_tracing();
    let server = TestServer::spawn().await;

    let (alice, _) = TestClient::join(&server, "lobby", "alice")
        .await
        .expect("alice failed to join");

    assert_eq!(handshake_status(&server, "lobby", "alice").await, Some(409));

    // The same name is free in a different room.
    let (other, roster) = TestClient::join(&server, "attic", "alice")
        .await
        .expect("alice failed to join attic");
    assert!(roster.is_empty());

    alice.close().await.expect("Failed to close client");
    other.close().await.expect("Failed to close client");
}
