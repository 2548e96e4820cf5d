//! Cooperative cancellation for suspended queue operations.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

/// Implemented by anything a cancelled token must wake.
pub(crate) trait Interrupt: Send + Sync {
    fn interrupt(&self);
}

#[derive(Default)]
struct TokenInner {
    cancelled: AtomicBool,
    next_id: AtomicU64,
    waiters: Mutex<Vec<(u64, Arc<dyn Interrupt>)>>,
}

/// Shared cancellation flag for blocking `put`/`get` calls.
///
/// Clones observe the same flag. Once cancelled a token stays cancelled, and
/// every operation suspended under it returns `Interrupted`.
#[derive(Clone, Default)]
pub struct CancelToken {
    inner: Arc<TokenInner>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the token and wakes every operation waiting under it.
    pub fn cancel(&self) {
        if self.inner.cancelled.swap(true, Ordering::SeqCst) {
            return;
        }
        let waiters: Vec<Arc<dyn Interrupt>> = self
            .inner
            .waiters
            .lock()
            .iter()
            .map(|(_, waiter)| Arc::clone(waiter))
            .collect();
        tracing::debug!(waiters = waiters.len(), "cancel token fired");
        for waiter in waiters {
            waiter.interrupt();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Keeps `waiter` reachable from [`cancel`](Self::cancel) until the
    /// returned guard drops.
    pub(crate) fn register(&self, waiter: Arc<dyn Interrupt>) -> Registration<'_> {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.waiters.lock().push((id, waiter));
        Registration { token: self, id }
    }
}

impl fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

pub(crate) struct Registration<'a> {
    token: &'a CancelToken,
    id: u64,
}

impl Drop for Registration<'_> {
    fn drop(&mut self) {
        self.token
            .inner
            .waiters
            .lock()
            .retain(|(id, _)| *id != self.id);
    }
}
