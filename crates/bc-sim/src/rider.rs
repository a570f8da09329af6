//! The rider agent: wander, queue, ride, repeat.

use std::thread;

use bc_core::{AgentRng, RiderId};

use crate::{Park, ParkEvent, ParkObserver, RiderState};

/// One rider thread's identity and private RNG, moved into the thread.
pub struct RiderAgent {
    id:  RiderId,
    rng: AgentRng,
}

impl RiderAgent {
    pub fn new(id: RiderId, rng: AgentRng) -> Self {
        Self { id, rng }
    }

    /// Run the rider's cycle until the park closes.
    ///
    /// Shutdown is checked at three points: before joining the line, after
    /// being admitted to a seat (a shutdown broadcast looks like an
    /// admission), and after each ride.
    pub fn run<O: ParkObserver + ?Sized>(mut self, park: &Park, observer: &O) {
        let id = self.id;
        loop {
            park.set_rider_state(id, RiderState::Wandering);
            observer.on_event(&ParkEvent::RiderWandering { rider: id });
            thread::sleep(self.rng.interval(park.config.wander_max));

            if park.counter.is_finished() {
                break;
            }

            park.set_rider_state(id, RiderState::InLine);
            let ticket = park.line.enqueue(id);
            observer.on_event(&ParkEvent::RiderJoinedLine { rider: id, ticket });

            park.slots.wait_begin(id);
            if park.counter.is_finished() {
                break;
            }

            park.set_rider_state(id, RiderState::Riding);
            observer.on_event(&ParkEvent::RiderRiding { rider: id });
            park.slots.wait_end(id);

            if park.counter.is_finished() {
                break;
            }
        }
        park.set_rider_state(id, RiderState::Left);
        observer.on_event(&ParkEvent::RiderLeft { rider: id });
    }
}
