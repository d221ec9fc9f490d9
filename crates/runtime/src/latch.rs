//! Shared "execution in flight" flag.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Set by the battle worker from the moment an action is resolved until its
/// presentation delay has elapsed.
///
/// The worker is the only writer. Handles read it to drop duplicate
/// submissions without a round trip to the worker.
#[derive(Clone, Debug, Default)]
pub struct ExecutionLatch {
    inner: Arc<AtomicBool>,
}

impl ExecutionLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.inner.load(Ordering::Acquire)
    }

    pub(crate) fn set(&self) {
        self.inner.store(true, Ordering::Release);
    }

    pub(crate) fn clear(&self) {
        self.inner.store(false, Ordering::Release);
    }
}
