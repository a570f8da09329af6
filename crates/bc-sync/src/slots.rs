//! `RendezvousSlots` — per-rider hand-off between a rider and its car.
//!
//! Each rider owns two [`Signal`]s:
//!
//! - **begin**: posted by the car that dequeued the rider ("take a seat").
//! - **end**: posted by the same car after its bump cycle ("ride is over").
//!
//! A rider is in at most one hand-off at a time: it only re-joins the line
//! after consuming its end signal, so one cycle's permits never leak into
//! the next.  The only extra permits are the shutdown broadcasts from
//! [`release_all`][RendezvousSlots::release_all] and
//! [`release_seated`][RendezvousSlots::release_seated].

use bc_core::RiderId;

use crate::Signal;

pub struct RendezvousSlots {
    begin: Vec<Signal>,
    end:   Vec<Signal>,
}

impl RendezvousSlots {
    /// Slots for riders `0..riders`, all unsignalled.
    pub fn new(riders: usize) -> Self {
        Self {
            begin: (0..riders).map(|_| Signal::new()).collect(),
            end:   (0..riders).map(|_| Signal::new()).collect(),
        }
    }

    pub fn rider_count(&self) -> usize {
        self.begin.len()
    }

    #[inline]
    pub fn signal_begin(&self, rider: RiderId) {
        self.begin[rider.index()].post();
    }

    #[inline]
    pub fn wait_begin(&self, rider: RiderId) {
        self.begin[rider.index()].wait();
    }

    #[inline]
    pub fn signal_end(&self, rider: RiderId) {
        self.end[rider.index()].post();
    }

    #[inline]
    pub fn wait_end(&self, rider: RiderId) {
        self.end[rider.index()].wait();
    }

    /// Post one begin permit to every rider, queued or not.
    ///
    /// Called once after the last car has stopped so that no rider stays
    /// blocked waiting for a seat.
    pub fn release_all(&self) {
        for slot in &self.begin {
            slot.post();
        }
    }

    /// Post one end permit to every rider.
    ///
    /// Used when a car stops without finishing its ride, so a rider seated
    /// in it is not left waiting for the unload.
    pub fn release_seated(&self) {
        for slot in &self.end {
            slot.post();
        }
    }

    /// Banked begin permits for `rider`.
    pub fn pending_begin(&self, rider: RiderId) -> u64 {
        self.begin[rider.index()].permits()
    }

    /// Banked end permits for `rider`.
    pub fn pending_end(&self, rider: RiderId) -> u64 {
        self.end[rider.index()].permits()
    }
}
