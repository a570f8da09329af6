//! The car agent: load, bump, unload, count down, repeat.

use std::thread;

use bc_core::{AgentRng, CarId};
use bc_sync::Claim;

use crate::{Park, ParkEvent, ParkObserver};

/// One car thread's identity and private RNG, moved into the thread.
pub struct CarAgent {
    id:  CarId,
    rng: AgentRng,
}

impl CarAgent {
    pub fn new(id: CarId, rng: AgentRng) -> Self {
        Self { id, rng }
    }

    /// Serve riders until the countdown is exhausted.
    ///
    /// A car reserves a ride with [`RideCounter::claim`][bc_sync::RideCounter::claim]
    /// before it touches the line.  The car that takes the last claim wakes
    /// every other car so none of them stays blocked on an empty line.
    pub fn run<O: ParkObserver + ?Sized>(mut self, park: &Park, observer: &O) {
        let id = self.id;
        while !park.counter.is_finished() {
            park.line.wait_for_rider();
            if park.counter.is_finished() {
                break;
            }
            match park.counter.claim() {
                Claim::Exhausted => break,
                Claim::Granted { last } => {
                    if last {
                        park.line.wake_cars(park.config.cars);
                    }
                }
            }

            // Loading
            let Some((rider, ticket)) = park.line.dequeue() else {
                broken_invariant(&format!("{id} was signalled but the waiting line is empty"));
            };
            park.set_occupant(id, Some(rider));
            observer.on_event(&ParkEvent::CarLoaded { car: id, rider, ticket });
            park.slots.signal_begin(rider);

            // Bumping
            observer.on_event(&ParkEvent::CarBumping { car: id });
            thread::sleep(self.rng.interval(park.config.bump_max));

            // Unloading
            park.set_occupant(id, None);
            park.record_ride(id, rider);
            observer.on_event(&ParkEvent::CarUnloaded { car: id, rider });
            park.slots.signal_end(rider);

            if park.counter.decrement_and_check() {
                break;
            }
        }
        observer.on_event(&ParkEvent::CarParked { car: id });
    }
}

/// A broken hand-off means the protocol itself is wrong; nothing downstream
/// can be trusted, so the whole process goes down.
fn broken_invariant(msg: &str) -> ! {
    eprintln!("fatal: {msg}");
    std::process::abort()
}
