use std::future::Future;
use std::time::Duration;

/// Timeout for a single relayed frame (ms).
pub const SIGNAL_TIMEOUT_MS: u64 = 2000;

/// How long to listen before concluding nothing was relayed (ms).
pub const SILENCE_WINDOW_MS: u64 = 300;

/// Timeout for a full offer/answer exchange between native peers (ms).
pub const NEGOTIATION_TIMEOUT_MS: u64 = 10000;

/// Polls `check` until it yields true or `timeout_ms` elapses.
pub async fn wait_until<F, Fut>(timeout_ms: u64, mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + Duration::from_millis(timeout_ms);
    loop {
        if check().await {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
}
