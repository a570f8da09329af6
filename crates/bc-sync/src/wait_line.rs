//! `WaitLine` — the FIFO of riders waiting for a car.
//!
//! # Protocol
//!
//! A rider appends itself with [`enqueue`][WaitLine::enqueue], which also
//! posts one "rider present" permit.  A car blocks in
//! [`wait_for_rider`][WaitLine::wait_for_rider] until a permit exists and only
//! then calls [`dequeue`][WaitLine::dequeue].  Permits and entries are
//! created together, so a car holding a permit always finds the line
//! non-empty while the park is running.
//!
//! At shutdown, [`wake_cars`][WaitLine::wake_cars] banks extra permits
//! without entries.  Cars woken that way check the ride counter and leave
//! without touching the line.
//!
//! Every enqueue is stamped with a [`Ticket`] drawn under the same lock, so
//! ticket order is exactly line order.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use bc_core::RiderId;

use crate::Signal;

/// Arrival sequence number of one enqueue, starting at zero.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Ticket(pub u64);

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Default)]
struct Line {
    entries:     VecDeque<(RiderId, Ticket)>,
    next_ticket: u64,
}

/// Mutex-guarded FIFO of rider ids plus the park-wide "rider present" signal.
#[derive(Default)]
pub struct WaitLine {
    line:    Mutex<Line>,
    present: Signal,
}

impl WaitLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `rider` at the back of the line and announce it to the cars.
    ///
    /// A rider may only be in the line once; debug builds assert this.
    pub fn enqueue(&self, rider: RiderId) -> Ticket {
        let ticket = {
            let mut line = self.lock();
            debug_assert!(
                line.entries.iter().all(|&(r, _)| r != rider),
                "{rider} is already in the waiting line"
            );
            let ticket = Ticket(line.next_ticket);
            line.next_ticket += 1;
            line.entries.push_back((rider, ticket));
            ticket
        };
        self.present.post();
        ticket
    }

    /// Block until at least one "rider present" permit is available and
    /// consume it.
    pub fn wait_for_rider(&self) {
        self.present.wait();
    }

    /// Remove the earliest rider.
    ///
    /// Only valid after [`wait_for_rider`][Self::wait_for_rider] returned.
    /// `None` means the permit/entry pairing was broken.
    pub fn dequeue(&self) -> Option<(RiderId, Ticket)> {
        self.lock().entries.pop_front()
    }

    /// Bank `cars` entry-less permits so every blocked car wakes up.
    pub fn wake_cars(&self, cars: usize) {
        self.present.post_n(cars as u64);
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Riders currently waiting, front first.
    pub fn snapshot(&self) -> Vec<RiderId> {
        self.lock().entries.iter().map(|&(r, _)| r).collect()
    }

    /// Total enqueues so far.
    pub fn tickets_issued(&self) -> u64 {
        self.lock().next_ticket
    }

    fn lock(&self) -> MutexGuard<'_, Line> {
        self.line.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
