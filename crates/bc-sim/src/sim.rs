//! The `Sim` runner and its shutdown sequence.

use std::fmt;
use std::thread;
use std::time::{Duration, Instant};

use bc_core::{AgentRng, CarId, RiderId};

use crate::status::run_status;
use crate::{CarAgent, Park, ParkObserver, RiderAgent, SimError, SimResult};

/// Outcome of one [`Sim::run`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Configured ride total.
    pub total_rides:     u64,
    /// Rides actually completed (unloads).  Equals `total_rides`.
    pub rides_completed: u64,
    /// Completed rides per rider, indexed by `RiderId`.
    pub rides_per_rider: Vec<u64>,
    /// Completed rides per car, indexed by `CarId`.
    pub rides_per_car:   Vec<u64>,
    /// Riders still queued when the park closed (never served).
    pub left_in_line:    Vec<RiderId>,
    /// Wall time from first spawn to last join.
    pub elapsed:         Duration,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} rides in {:.3}s, {} rider(s) left in line",
            self.rides_completed,
            self.total_rides,
            self.elapsed.as_secs_f64(),
            self.left_in_line.len(),
        )
    }
}

/// The park simulation runner.
///
/// Holds the shared [`Park`]; every run spawns fresh agent threads that
/// borrow it.  The countdown is never re-armed, so running the same `Sim`
/// twice serves no rides the second time.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    pub park: Park,
}

impl Sim {
    pub fn new(park: Park) -> Self {
        Self { park }
    }

    /// Run the park until the ride countdown is exhausted and every thread
    /// has exited.
    ///
    /// # Shutdown order
    ///
    /// 1. Join every car.  After this no seat will ever be handed out.
    /// 2. Post one begin signal to every rider so riders still in line wake,
    ///    see the park is closed, and leave.
    /// 3. Join every rider.
    /// 4. Join the status thread.
    ///
    /// Joining riders before the release broadcast could leave a queued rider
    /// blocked forever.
    ///
    /// A car that panics closes the park on its way out: its claimed ride
    /// can never complete, so the countdown is forced to zero and every
    /// blocked thread is released.  The run then winds down as above and
    /// reports [`SimError::AgentPanicked`].
    pub fn run<O: ParkObserver>(&self, observer: &O) -> SimResult<RunSummary> {
        let park = &self.park;
        let seed = park.config.seed;
        let start = Instant::now();

        let panicked: Vec<String> = thread::scope(|s| {
            let cars: Vec<_> = CarId::range(park.config.cars)
                .map(|id| {
                    let agent = CarAgent::new(id, AgentRng::for_car(seed, id));
                    let handle = s.spawn(move || {
                        let _guard = CloseOnPanic(park);
                        agent.run(park, observer)
                    });
                    (id.to_string(), handle)
                })
                .collect();
            let riders: Vec<_> = RiderId::range(park.config.riders)
                .map(|id| {
                    let agent = RiderAgent::new(id, AgentRng::for_rider(seed, id));
                    (id.to_string(), s.spawn(move || agent.run(park, observer)))
                })
                .collect();
            let status = s.spawn(|| run_status(park, observer));

            let mut panicked = Vec::new();
            for (name, handle) in cars {
                if handle.join().is_err() {
                    panicked.push(name);
                }
            }
            park.slots.release_all();
            for (name, handle) in riders {
                if handle.join().is_err() {
                    panicked.push(name);
                }
            }
            if status.join().is_err() {
                panicked.push("status".to_string());
            }
            panicked
        });

        if let Some(agent) = panicked.into_iter().next() {
            return Err(SimError::AgentPanicked { agent });
        }

        let summary = RunSummary {
            total_rides:     park.counter.total(),
            rides_completed: park.rides_completed(),
            rides_per_rider: RiderId::range(park.config.riders).map(|r| park.rides_of(r)).collect(),
            rides_per_car:   CarId::range(park.config.cars).map(|c| park.rides_by(c)).collect(),
            left_in_line:    park.line.snapshot(),
            elapsed:         start.elapsed(),
        };
        observer.on_sim_end(&summary);
        Ok(summary)
    }
}

/// Closes the park if the owning car thread unwinds.
struct CloseOnPanic<'a>(&'a Park);

impl Drop for CloseOnPanic<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.abandon();
        }
    }
}
