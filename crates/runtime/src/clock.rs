//! Time source for the presentation delay.
//!
//! The battle worker never calls `tokio::time` directly so tests can run a
//! whole battle without waiting on wall-clock time.

use std::time::Duration;

use async_trait::async_trait;

/// Suspends the caller for a while.
#[async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real time, backed by `tokio::time::sleep`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Yields once instead of sleeping.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImmediateClock;

#[async_trait]
impl Clock for ImmediateClock {
    async fn sleep(&self, _duration: Duration) {
        tokio::task::yield_now().await;
    }
}
