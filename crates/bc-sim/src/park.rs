//! The `Park` context shared by every agent thread.

use std::sync::atomic::{AtomicU8, AtomicU32, AtomicU64, Ordering};

use bc_core::{CarId, ParkConfig, ParkResult, RiderId};
use bc_sync::{RendezvousSlots, RideCounter, WaitLine};

use crate::{RiderState, StatusSnapshot};

/// All shared state of one park run.
///
/// Created once before any thread starts and borrowed by all of them.  The
/// synchronization primitives (`line`, `slots`, `counter`) carry the ride
/// protocol.  The per-agent cells below them are display and bookkeeping
/// only: each is written by exactly one thread and read without locking.
pub struct Park {
    pub config:  ParkConfig,
    pub line:    WaitLine,
    pub slots:   RendezvousSlots,
    pub counter: RideCounter,

    /// `RiderState` as `u8`, indexed by `RiderId`.
    rider_states:    Vec<AtomicU8>,
    /// Occupant `RiderId` (or `RiderId::INVALID`), indexed by `CarId`.
    occupants:       Vec<AtomicU32>,
    rides_per_rider: Vec<AtomicU64>,
    rides_per_car:   Vec<AtomicU64>,
}

impl Park {
    /// Validate `config` and allocate every primitive for its cohort.
    pub fn new(config: ParkConfig) -> ParkResult<Self> {
        config.validate()?;
        Ok(Self {
            line:            WaitLine::new(),
            slots:           RendezvousSlots::new(config.riders),
            counter:         RideCounter::new(config.total_rides),
            rider_states:    atomics(config.riders, RiderState::Wandering as u8),
            occupants:       atomics(config.cars, RiderId::INVALID.0),
            rides_per_rider: atomics(config.riders, 0),
            rides_per_car:   atomics(config.cars, 0),
            config,
        })
    }

    // ── Riders ────────────────────────────────────────────────────────────

    pub fn rider_state(&self, rider: RiderId) -> RiderState {
        RiderState::from_u8(self.rider_states[rider.index()].load(Ordering::Relaxed))
    }

    pub(crate) fn set_rider_state(&self, rider: RiderId, state: RiderState) {
        self.rider_states[rider.index()].store(state as u8, Ordering::Relaxed);
    }

    /// Completed rides for `rider`.
    pub fn rides_of(&self, rider: RiderId) -> u64 {
        self.rides_per_rider[rider.index()].load(Ordering::Relaxed)
    }

    // ── Cars ──────────────────────────────────────────────────────────────

    /// The rider currently seated in `car`, if any.
    pub fn occupant(&self, car: CarId) -> Option<RiderId> {
        let raw = RiderId(self.occupants[car.index()].load(Ordering::Acquire));
        raw.is_valid().then_some(raw)
    }

    pub(crate) fn set_occupant(&self, car: CarId, rider: Option<RiderId>) {
        let raw = rider.unwrap_or(RiderId::INVALID);
        self.occupants[car.index()].store(raw.0, Ordering::Release);
    }

    /// Completed rides for `car`.
    pub fn rides_by(&self, car: CarId) -> u64 {
        self.rides_per_car[car.index()].load(Ordering::Relaxed)
    }

    pub(crate) fn record_ride(&self, car: CarId, rider: RiderId) {
        self.rides_per_car[car.index()].fetch_add(1, Ordering::Relaxed);
        self.rides_per_rider[rider.index()].fetch_add(1, Ordering::Relaxed);
    }

    /// Sum of completed rides over all cars.
    pub fn rides_completed(&self) -> u64 {
        self.rides_per_car.iter().map(|c| c.load(Ordering::Relaxed)).sum()
    }

    // ── Shutdown ──────────────────────────────────────────────────────────

    /// Close the park early because an agent died.
    ///
    /// Finishes the countdown, wakes every car blocked on the line and
    /// posts both hand-off signals to every rider, so each thread reaches
    /// its shutdown check without waiting for a ride that will not come.
    pub(crate) fn abandon(&self) {
        self.counter.close();
        self.line.wake_cars(self.config.cars);
        self.slots.release_all();
        self.slots.release_seated();
    }

    // ── Snapshot ──────────────────────────────────────────────────────────

    /// Best-effort view of every car and rider.
    ///
    /// Each cell is read independently, so the result may mix moments (a
    /// rider shown in line while a car already lists it as occupant).  It is
    /// stale at worst, never blocking.
    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            cars:            CarId::range(self.config.cars).map(|c| self.occupant(c)).collect(),
            riders:          RiderId::range(self.config.riders).map(|r| self.rider_state(r)).collect(),
            remaining_rides: self.counter.remaining(),
        }
    }
}

fn atomics<A: From<T>, T: Copy>(n: usize, init: T) -> Vec<A> {
    (0..n).map(|_| A::from(init)).collect()
}
