//! Rider display states, status snapshots, and the status thread loop.

use std::fmt;

use bc_core::{CarId, RiderId};

use crate::{Park, ParkObserver};

/// What a rider is doing, as shown in status snapshots.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum RiderState {
    Wandering = 0,
    /// In the waiting line or waiting for the seat it was given.
    InLine    = 1,
    Riding    = 2,
    /// Terminated after shutdown.
    Left      = 3,
}

impl RiderState {
    pub(crate) fn from_u8(raw: u8) -> Self {
        match raw {
            0 => RiderState::Wandering,
            1 => RiderState::InLine,
            2 => RiderState::Riding,
            _ => RiderState::Left,
        }
    }
}

/// A point-in-time (best-effort) view of the park.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusSnapshot {
    /// Occupant of each car, indexed by `CarId`.
    pub cars:            Vec<Option<RiderId>>,
    /// State of each rider, indexed by `RiderId`.
    pub riders:          Vec<RiderState>,
    pub remaining_rides: u64,
}

impl fmt::Display for StatusSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "The current situation in the park is ({} rides to go):",
            self.remaining_rides
        )?;
        for (car, occupant) in CarId::range(self.cars.len()).zip(&self.cars) {
            match occupant {
                Some(rider) => writeln!(f, "  {car} is running. The rider is {}.", rider.0)?,
                None        => writeln!(f, "  {car} is not running.")?,
            }
        }
        for (rider, state) in RiderId::range(self.riders.len()).zip(&self.riders) {
            let what = match state {
                RiderState::Wandering => "is wandering",
                RiderState::InLine    => "is waiting in line",
                RiderState::Riding    => "is in a car",
                RiderState::Left      => "has left the park",
            };
            write!(f, "  {rider} {what}.")?;
            if rider.index() + 1 < self.riders.len() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Body of the status thread.
///
/// Reports a snapshot, then sleeps `display_interval` on the ride counter so
/// the thread wakes as soon as the park closes instead of finishing its
/// sleep.  A zero interval disables reporting.
pub(crate) fn run_status<O: ParkObserver + ?Sized>(park: &Park, observer: &O) {
    let interval = park.config.display_interval;
    if interval.is_zero() {
        return;
    }
    while !park.counter.is_finished() {
        observer.on_status(&park.snapshot());
        if park.counter.wait_finished_timeout(interval) {
            break;
        }
    }
}
