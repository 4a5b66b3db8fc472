use meet_core::Negotiator;

use crate::integration::init_tracing;
use crate::utils::{TestClient, TestServer};

#[tokio::test]
async fn test_echo_round_trip() {
    init_tracing();
    let server = TestServer::spawn().await;

    let (mut alice, _) = TestClient::join(&server, "lobby", "alice")
        .await
        .expect("alice failed to join");

    let echo = Negotiator::new("alice").echo();
    alice.send(&echo).await.expect("Failed to send echo");

    let back = alice.recv().await.expect("echo did not come back");
    assert_eq!(back, echo);

    alice.close().await.expect("Failed to close client");
}
