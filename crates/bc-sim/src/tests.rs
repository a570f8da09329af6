//! Integration tests for bc-sim.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use bc_core::{CarId, RiderId};
use bc_sync::Ticket;

use crate::{
    NoopObserver, ParkEvent, ParkObserver, RiderState, RunSummary, Sim, SimBuilder, SimError,
    SimResult, StatusSnapshot,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Records every event and checks seat exclusivity as events arrive.
#[derive(Default)]
struct Recorder {
    events:     Mutex<Vec<ParkEvent>>,
    seated:     Mutex<HashSet<RiderId>>,
    violations: Mutex<Vec<String>>,
    statuses:   AtomicUsize,
    ended:      AtomicUsize,
}

impl Recorder {
    fn events(&self) -> Vec<ParkEvent> {
        self.events.lock().unwrap().clone()
    }

    fn count(&self, pred: impl Fn(&ParkEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| pred(e)).count()
    }

    fn loaded_tickets(&self) -> Vec<Ticket> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                ParkEvent::CarLoaded { ticket, .. } => Some(*ticket),
                _ => None,
            })
            .collect()
    }
}

impl ParkObserver for Recorder {
    fn on_event(&self, event: &ParkEvent) {
        match event {
            ParkEvent::CarLoaded { car, rider, .. } => {
                if !self.seated.lock().unwrap().insert(*rider) {
                    self.violations
                        .lock()
                        .unwrap()
                        .push(format!("{rider} loaded into {car} while already seated"));
                }
            }
            ParkEvent::CarUnloaded { rider, .. } => {
                self.seated.lock().unwrap().remove(rider);
            }
            _ => {}
        }
        self.events.lock().unwrap().push(event.clone());
    }

    fn on_status(&self, _snapshot: &StatusSnapshot) {
        self.statuses.fetch_add(1, Ordering::Relaxed);
    }

    fn on_sim_end(&self, _summary: &RunSummary) {
        self.ended.fetch_add(1, Ordering::Relaxed);
    }
}

/// Run on a helper thread and fail the test instead of hanging if the park
/// does not shut down in time.
fn run_within<O>(sim: Sim, observer: Arc<O>, deadline: Duration) -> (Sim, SimResult<RunSummary>)
where
    O: ParkObserver + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = sim.run(&*observer);
        let _ = tx.send((sim, result));
    });
    match rx.recv_timeout(deadline) {
        Ok(done) => done,
        Err(_) => panic!("park did not shut down within {deadline:?}"),
    }
}

fn run_bounded(sim: Sim, recorder: Arc<Recorder>, deadline: Duration) -> (Sim, RunSummary) {
    let (sim, result) = run_within(sim, recorder, deadline);
    (sim, result.expect("run failed"))
}

fn instant(riders: usize, cars: usize, rides: u64) -> Sim {
    SimBuilder::new()
        .riders(riders)
        .cars(cars)
        .total_rides(rides)
        .instant()
        .display_interval(Duration::ZERO)
        .build()
        .unwrap()
}

const DEADLINE: Duration = Duration::from_secs(10);

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_successfully_with_defaults() {
        let sim = SimBuilder::new().build().unwrap();
        assert_eq!(sim.park.config.riders, 5);
        assert_eq!(sim.park.config.cars, 2);
        assert_eq!(sim.park.counter.total(), 10);
        assert_eq!(sim.park.slots.rider_count(), 5);
    }

    #[test]
    fn zero_cars_errors() {
        let result = SimBuilder::new().cars(0).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn zero_riders_errors() {
        let result = SimBuilder::new().riders(0).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn fresh_park_is_idle() {
        let sim = instant(3, 2, 4);
        let snap = sim.park.snapshot();
        assert_eq!(snap.cars, vec![None, None]);
        assert_eq!(snap.riders, vec![RiderState::Wandering; 3]);
        assert_eq!(snap.remaining_rides, 4);
        assert!(sim.park.line.is_empty());
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn five_riders_two_cars_ten_rides() {
        let rec = Arc::new(Recorder::default());
        let (_, summary) = run_bounded(instant(5, 2, 10), Arc::clone(&rec), DEADLINE);

        assert!(summary.elapsed < Duration::from_secs(1), "took {:?}", summary.elapsed);
        assert_eq!(summary.rides_completed, 10);
        assert_eq!(summary.rides_per_rider.iter().sum::<u64>(), 10);
        assert_eq!(summary.rides_per_car.iter().sum::<u64>(), 10);
        let over = rec.count(|e| matches!(e, ParkEvent::CarUnloaded { .. }));
        assert_eq!(over, 10, "expected exactly 10 'ride is over' events");
        assert_eq!(rec.ended.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn zero_rides_serves_nobody() {
        let rec = Arc::new(Recorder::default());
        let (sim, summary) = run_bounded(instant(5, 2, 0), Arc::clone(&rec), DEADLINE);

        assert_eq!(summary.rides_completed, 0);
        assert!(summary.left_in_line.is_empty());
        assert!(sim.park.line.is_empty());
        assert_eq!(sim.park.line.tickets_issued(), 0, "nobody may queue for a closed ride");
        assert_eq!(rec.count(|e| matches!(e, ParkEvent::CarLoaded { .. })), 0);
        assert_eq!(rec.count(|e| matches!(e, ParkEvent::CarParked { .. })), 2);
        assert_eq!(rec.count(|e| matches!(e, ParkEvent::RiderLeft { .. })), 5);
    }

    #[test]
    fn one_rider_one_car_three_rides() {
        let rec = Arc::new(Recorder::default());
        let (_, summary) = run_bounded(instant(1, 1, 3), Arc::clone(&rec), DEADLINE);

        assert_eq!(summary.rides_per_rider, vec![3]);
        assert_eq!(summary.rides_per_car, vec![3]);
        let rider = RiderId(0);
        let car = CarId(0);
        assert_eq!(rec.count(|e| *e == ParkEvent::CarUnloaded { car, rider }), 3);
        assert_eq!(rec.count(|e| matches!(e, ParkEvent::CarLoaded { .. })), 3);
    }

    /// One rider and more cars than rides: the idle cars must still be woken
    /// and parked once the last ride is claimed.
    #[test]
    fn idle_cars_are_parked_at_shutdown() {
        let rec = Arc::new(Recorder::default());
        let (_, summary) = run_bounded(instant(1, 4, 1), Arc::clone(&rec), DEADLINE);

        assert_eq!(summary.rides_completed, 1);
        assert_eq!(rec.count(|e| matches!(e, ParkEvent::CarParked { .. })), 4);
    }

    /// One car, one ride: the car holds its only ride until every rider has
    /// queued, so four riders are still in line when the park closes and
    /// must be freed by the shutdown broadcast.
    #[test]
    fn riders_still_in_line_leave_at_shutdown() {
        struct HoldUntilAllQueued {
            rec:    Recorder,
            riders: usize,
        }
        impl ParkObserver for HoldUntilAllQueued {
            fn on_event(&self, event: &ParkEvent) {
                self.rec.on_event(event);
                if matches!(event, ParkEvent::CarBumping { .. }) {
                    let until = Instant::now() + DEADLINE / 2;
                    while self.rec.count(|e| matches!(e, ParkEvent::RiderJoinedLine { .. }))
                        < self.riders
                        && Instant::now() < until
                    {
                        thread::yield_now();
                    }
                }
            }

            fn on_sim_end(&self, summary: &RunSummary) {
                self.rec.on_sim_end(summary);
            }
        }

        let obs = Arc::new(HoldUntilAllQueued { rec: Recorder::default(), riders: 5 });
        let (sim, result) = run_within(instant(5, 1, 1), Arc::clone(&obs), DEADLINE);
        let summary = result.expect("run failed");

        assert_eq!(summary.rides_completed, 1);
        let (served, waiting): (Vec<RiderId>, Vec<RiderId>) =
            RiderId::range(5).partition(|r| summary.rides_per_rider[r.index()] == 1);
        assert_eq!(served.len(), 1);
        // The served rider may have queued again before the countdown hit zero.
        for rider in &waiting {
            assert!(summary.left_in_line.contains(rider), "{rider} missing from {:?}", summary.left_in_line);
        }
        assert!(summary.left_in_line.len() <= 5);

        assert_eq!(obs.rec.count(|e| matches!(e, ParkEvent::RiderRiding { .. })), 1);
        assert_eq!(obs.rec.count(|e| matches!(e, ParkEvent::RiderLeft { .. })), 5);
        assert_eq!(sim.park.snapshot().riders, vec![RiderState::Left; 5]);
    }

    #[test]
    fn random_intervals_still_complete() {
        let sim = SimBuilder::new()
            .riders(6)
            .cars(3)
            .total_rides(15)
            .wander_max(Duration::from_millis(3))
            .bump_max(Duration::from_millis(2))
            .display_interval(Duration::from_millis(1))
            .seed(7)
            .build()
            .unwrap();
        let rec = Arc::new(Recorder::default());
        let (_, summary) = run_bounded(sim, Arc::clone(&rec), DEADLINE);
        assert_eq!(summary.rides_completed, 15);
    }

    #[test]
    fn second_run_serves_nothing() {
        let rec = Arc::new(Recorder::default());
        let (sim, first) = run_bounded(instant(3, 2, 4), Arc::clone(&rec), DEADLINE);
        assert_eq!(first.rides_completed, 4);

        let again = Arc::new(Recorder::default());
        let (_, second) = run_bounded(sim, Arc::clone(&again), DEADLINE);
        assert_eq!(second.rides_completed, 4, "totals carry over, no new rides");
        assert_eq!(again.count(|e| matches!(e, ParkEvent::CarLoaded { .. })), 0);
    }
}

// ── Protocol properties ───────────────────────────────────────────────────────

#[cfg(test)]
mod property_tests {
    use super::*;

    #[test]
    fn completed_rides_match_total_across_cohorts() {
        for &(riders, cars, rides) in &[
            (1, 1, 1),
            (1, 2, 5),
            (2, 8, 9),
            (8, 1, 20),
            (20, 3, 100),
            (3, 3, 3),
        ] {
            let rec = Arc::new(Recorder::default());
            let (_, summary) = run_bounded(instant(riders, cars, rides), Arc::clone(&rec), DEADLINE);
            assert_eq!(
                summary.rides_completed, rides,
                "riders={riders} cars={cars}: completed {} rides",
                summary.rides_completed,
            );
            assert_eq!(
                rec.count(|e| matches!(e, ParkEvent::CarParked { .. })),
                cars,
                "every car parks",
            );
            assert_eq!(
                rec.count(|e| matches!(e, ParkEvent::RiderLeft { .. })),
                riders,
                "every rider leaves",
            );
        }
    }

    #[test]
    fn no_rider_in_two_cars() {
        let rec = Arc::new(Recorder::default());
        run_bounded(instant(4, 4, 200), Arc::clone(&rec), DEADLINE);
        let violations = rec.violations.lock().unwrap();
        assert!(violations.is_empty(), "{violations:?}");
    }

    /// FIFO service: exactly `total` riders are loaded, and they are the
    /// first `total` tickets ever issued.
    #[test]
    fn served_riders_are_the_earliest_in_line() {
        let rec = Arc::new(Recorder::default());
        let (sim, _) = run_bounded(instant(10, 3, 60), Arc::clone(&rec), DEADLINE);

        let mut tickets = rec.loaded_tickets();
        tickets.sort();
        let expected: Vec<Ticket> = (0..60).map(Ticket).collect();
        assert_eq!(tickets, expected);
        assert!(sim.park.line.tickets_issued() >= 60);
    }

    #[test]
    fn waiting_line_never_holds_duplicates() {
        let sim = instant(8, 2, 300);
        let rec = Recorder::default();
        thread::scope(|s| {
            let run = s.spawn(|| sim.run(&rec));
            while !sim.park.counter.is_finished() {
                let line = sim.park.line.snapshot();
                let unique: HashSet<_> = line.iter().collect();
                assert_eq!(unique.len(), line.len(), "duplicate in line: {line:?}");
                thread::yield_now();
            }
            run.join().unwrap().unwrap();
        });
    }

    #[test]
    fn every_rider_ends_left_and_every_seat_empty() {
        let (sim, _) = run_bounded(instant(6, 3, 30), Arc::new(Recorder::default()), DEADLINE);
        let snap = sim.park.snapshot();
        assert_eq!(snap.riders, vec![RiderState::Left; 6]);
        assert_eq!(snap.cars, vec![None; 3]);
        assert_eq!(snap.remaining_rides, 0);
    }

    /// Per-rider event order: a rider's ride always follows its own queueing.
    #[test]
    fn rider_rides_only_after_joining_the_line() {
        let rec = Arc::new(Recorder::default());
        run_bounded(instant(3, 2, 30), Arc::clone(&rec), DEADLINE);
        for rider in RiderId::range(3) {
            let mut queued = false;
            for e in rec.events() {
                match e {
                    ParkEvent::RiderJoinedLine { rider: r, .. } if r == rider => queued = true,
                    ParkEvent::RiderRiding { rider: r } if r == rider => {
                        assert!(queued, "{rider} rode without queueing");
                        queued = false;
                    }
                    _ => {}
                }
            }
        }
    }
}

// ── Observer plumbing ─────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;

    #[test]
    fn status_reported_while_running() {
        let sim = SimBuilder::new()
            .riders(2)
            .cars(1)
            .total_rides(5)
            .wander_max(Duration::ZERO)
            .bump_max(Duration::from_millis(20))
            .display_interval(Duration::from_millis(1))
            .build()
            .unwrap();
        let rec = Arc::new(Recorder::default());
        run_bounded(sim, Arc::clone(&rec), DEADLINE);
        assert!(rec.statuses.load(Ordering::Relaxed) >= 1);
    }

    #[test]
    fn zero_display_interval_disables_status() {
        let rec = Arc::new(Recorder::default());
        run_bounded(instant(2, 1, 5), Arc::clone(&rec), DEADLINE);
        assert_eq!(rec.statuses.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn noop_observer_runs() {
        let summary = instant(2, 2, 4).run(&NoopObserver).unwrap();
        assert_eq!(summary.rides_completed, 4);
    }

    #[test]
    fn panicking_agent_is_reported() {
        struct PanicOnRiderZero;
        impl ParkObserver for PanicOnRiderZero {
            fn on_event(&self, event: &ParkEvent) {
                if *event == (ParkEvent::RiderWandering { rider: RiderId(0) }) {
                    panic!("rider 0 tripped");
                }
            }
        }
        let result = instant(3, 1, 4).run(&PanicOnRiderZero);
        match result {
            Err(SimError::AgentPanicked { agent }) => assert_eq!(agent, "Rider 0"),
            other => panic!("expected AgentPanicked, got {other:?}"),
        }
    }

    /// A car dying mid-bump holds a claim that will never complete and a
    /// rider waiting to be unloaded.  The run must still wind down.
    #[test]
    fn car_panicking_mid_ride_still_shuts_down() {
        struct PanicOnBump;
        impl ParkObserver for PanicOnBump {
            fn on_event(&self, event: &ParkEvent) {
                if let ParkEvent::CarBumping { car } = event {
                    panic!("{car} crashed into the wall");
                }
            }
        }
        let (sim, result) = run_within(instant(3, 2, 4), Arc::new(PanicOnBump), DEADLINE);
        match result {
            Err(SimError::AgentPanicked { agent }) => {
                assert!(agent.starts_with("Car "), "unexpected agent {agent}")
            }
            other => panic!("expected AgentPanicked, got {other:?}"),
        }
        assert!(sim.park.counter.is_finished());
        assert_eq!(sim.park.rides_completed(), 0);
        assert_eq!(sim.park.snapshot().riders, vec![RiderState::Left; 3]);
    }

    #[test]
    fn event_lines_read_naturally() {
        let lines: Vec<String> = [
            ParkEvent::RiderWandering { rider: RiderId(1) },
            ParkEvent::RiderJoinedLine { rider: RiderId(1), ticket: Ticket(0) },
            ParkEvent::CarLoaded { car: CarId(0), rider: RiderId(1), ticket: Ticket(0) },
            ParkEvent::RiderRiding { rider: RiderId(1) },
            ParkEvent::CarBumping { car: CarId(0) },
            ParkEvent::CarUnloaded { car: CarId(0), rider: RiderId(1) },
            ParkEvent::RiderLeft { rider: RiderId(1) },
            ParkEvent::CarParked { car: CarId(0) },
        ]
        .iter()
        .map(ToString::to_string)
        .collect();

        assert_eq!(lines, vec![
            "Rider 1 is wandering around the park.",
            "Rider 1 gets in the waiting line.",
            "Car 0 takes the rider 1.",
            "Rider 1 is taking the ride.",
            "Car 0 is bumping around the arena.",
            "This ride of Car 0 is over. Get out 1.",
            "Rider 1 has left because we're shut down.",
            "Car 0 is parked for the night.",
        ]);
    }

    #[test]
    fn snapshot_renders_cars_then_riders() {
        let snap = StatusSnapshot {
            cars:            vec![Some(RiderId(2)), None],
            riders:          vec![RiderState::Wandering, RiderState::InLine, RiderState::Riding],
            remaining_rides: 7,
        };
        let text = snap.to_string();
        assert_eq!(
            text,
            "The current situation in the park is (7 rides to go):\n\
             \x20 Car 0 is running. The rider is 2.\n\
             \x20 Car 1 is not running.\n\
             \x20 Rider 0 is wandering.\n\
             \x20 Rider 1 is waiting in line.\n\
             \x20 Rider 2 is in a car."
        );
    }
}
