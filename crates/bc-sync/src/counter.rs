//! `RideCounter` — the countdown that decides when the park closes.
//!
//! # Claims and completions
//!
//! Two tallies live under one lock:
//!
//! - `unclaimed`: rides no car has committed to yet.  A car takes a claim
//!   *before* dequeuing a rider and gives up if none is left.
//! - `remaining`: rides not yet completed.  A car decrements it after
//!   unloading.
//!
//! `unclaimed <= remaining` always holds, so the number of completed rides
//! is exactly the initial total no matter how many cars are mid-ride when
//! the countdown nears zero.
//!
//! `remaining` is mirrored in an atomic for the lock-free
//! [`is_finished`][RideCounter::is_finished] check.  The value only ever
//! decreases, so a stale read can delay shutdown awareness but never
//! trigger it early.  Once finished, the counter is never re-armed.
//!
//! [`close`][RideCounter::close] forces the finished state when a car dies
//! mid-ride and its claim can never be completed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Outcome of [`RideCounter::claim`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Claim {
    /// A ride was reserved.  `last` is set when it was the final one.
    Granted { last: bool },
    /// Every ride is already claimed.
    Exhausted,
}

struct Tally {
    remaining: u64,
    unclaimed: u64,
    closed:    bool,
}

pub struct RideCounter {
    tally:     Mutex<Tally>,
    remaining: AtomicU64,
    finished:  Condvar,
    total:     u64,
}

impl RideCounter {
    pub fn new(total: u64) -> Self {
        Self {
            tally:     Mutex::new(Tally { remaining: total, unclaimed: total, closed: false }),
            remaining: AtomicU64::new(total),
            finished:  Condvar::new(),
            total,
        }
    }

    /// The configured number of rides.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Reserve one ride for the calling car.
    pub fn claim(&self) -> Claim {
        let mut tally = self.lock();
        if tally.unclaimed == 0 {
            return Claim::Exhausted;
        }
        tally.unclaimed -= 1;
        Claim::Granted { last: tally.unclaimed == 0 }
    }

    /// Record one completed ride.  Returns `true` when no rides remain.
    ///
    /// After [`close`][Self::close] this is a no-op that reports `true`.
    pub fn decrement_and_check(&self) -> bool {
        let mut tally = self.lock();
        if tally.closed {
            return true;
        }
        debug_assert!(
            tally.remaining > tally.unclaimed,
            "ride completed without a claim"
        );
        tally.remaining = tally.remaining.saturating_sub(1);
        self.remaining.store(tally.remaining, Ordering::Release);
        let done = tally.remaining == 0;
        if done {
            self.finished.notify_all();
        }
        done
    }

    /// Drop every outstanding claim and finish the countdown now.
    ///
    /// Rides already completed stay counted.  Later claims are exhausted and
    /// later completions are ignored.
    pub fn close(&self) {
        let mut tally = self.lock();
        tally.closed = true;
        tally.remaining = 0;
        tally.unclaimed = 0;
        self.remaining.store(0, Ordering::Release);
        self.finished.notify_all();
    }

    /// Lock-free check for shutdown.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.remaining.load(Ordering::Acquire) == 0
    }

    /// Rides not yet completed (lock-free, possibly stale).
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.remaining.load(Ordering::Acquire)
    }

    /// Block until the park is finished or `timeout` elapses.
    ///
    /// Returns `true` if the park is finished.
    pub fn wait_finished_timeout(&self, timeout: Duration) -> bool {
        let guard = self.lock();
        let (tally, _) = self
            .finished
            .wait_timeout_while(guard, timeout, |t| t.remaining > 0)
            .unwrap_or_else(PoisonError::into_inner);
        tally.remaining == 0
    }

    fn lock(&self) -> MutexGuard<'_, Tally> {
        self.tally.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
