//! `Signal` — a counting semaphore built on `Mutex` + `Condvar`.
//!
//! `post` adds a permit and `wait` consumes one, blocking while none are
//! available.  Permits accumulate, so a post that happens before the matching
//! wait is never lost.

use std::sync::{Condvar, Mutex, PoisonError};

#[derive(Default)]
pub struct Signal {
    permits: Mutex<u64>,
    ready:   Condvar,
}

impl Signal {
    /// A signal with no permits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one permit and wake one waiter.
    pub fn post(&self) {
        self.post_n(1);
    }

    /// Add `n` permits and wake up to `n` waiters.
    pub fn post_n(&self, n: u64) {
        if n == 0 {
            return;
        }
        let mut permits = self.permits.lock().unwrap_or_else(PoisonError::into_inner);
        *permits += n;
        if n == 1 {
            self.ready.notify_one();
        } else {
            self.ready.notify_all();
        }
    }

    /// Block until a permit is available, then consume it.
    pub fn wait(&self) {
        let guard = self.permits.lock().unwrap_or_else(PoisonError::into_inner);
        let mut permits = self
            .ready
            .wait_while(guard, |p| *p == 0)
            .unwrap_or_else(PoisonError::into_inner);
        *permits -= 1;
    }

    /// Permits currently banked.
    pub fn permits(&self) -> u64 {
        *self.permits.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
