use crate::integration::init_tracing;
use crate::utils::{TestServer, handshake_status};

#[tokio::test]
async fn test_empty_name_rejected() {
    init_tracing();
    let server = TestServer::spawn().await;

    assert_eq!(handshake_status(&server, "lobby", "%20").await, Some(400));
    assert_eq!(handshake_status(&server, "%20%20", "alice").await, Some(400));
    assert_eq!(server.state.rooms.room_count(), 0);
}
