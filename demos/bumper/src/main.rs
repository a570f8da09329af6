//! bumper — the classic bumper-car exercise.
//!
//! Five riders share two cars until ten rides have been given, then the park
//! closes.  Every step of every agent is printed as one line; the park
//! situation is printed every `DISPLAY_INTERVAL`.

use std::time::Duration;

use anyhow::Result;

use bc_core::ParkConfig;
use bc_sim::{ParkEvent, ParkObserver, RunSummary, SimBuilder, StatusSnapshot};

// ── Constants ─────────────────────────────────────────────────────────────────

const N_RIDERS:         usize    = 5;
const N_CARS:           usize    = 2;
const TOTAL_RIDES:      u64      = 10;
const WANDER_MAX:       Duration = Duration::from_millis(1_000); // each wander in [0, 1 s)
const BUMP_MAX:         Duration = Duration::from_millis(400);   // each bump in [0, 0.4 s)
const DISPLAY_INTERVAL: Duration = Duration::from_millis(500);
const SEED:             u64      = 42;

// ── Observer ──────────────────────────────────────────────────────────────────

/// Prints events and snapshots to stdout.  One `println!` per callback keeps
/// each line whole when threads interleave.
struct PrintObserver;

impl ParkObserver for PrintObserver {
    fn on_event(&self, event: &ParkEvent) {
        println!("{event}");
    }

    fn on_status(&self, snapshot: &StatusSnapshot) {
        println!("{snapshot}");
    }

    fn on_sim_end(&self, summary: &RunSummary) {
        println!("The park is closed: {summary}");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let config = ParkConfig {
        riders:           N_RIDERS,
        cars:             N_CARS,
        total_rides:      TOTAL_RIDES,
        wander_max:       WANDER_MAX,
        bump_max:         BUMP_MAX,
        display_interval: DISPLAY_INTERVAL,
        seed:             SEED,
    };
    println!("=== bumper — {N_RIDERS} riders, {N_CARS} cars, {TOTAL_RIDES} rides ===");
    println!();

    let sim = SimBuilder::from_config(config).build()?;
    let summary = sim.run(&PrintObserver)?;

    println!();
    println!("{:<10} {:>6}", "Rider", "Rides");
    println!("{}", "-".repeat(17));
    for (i, rides) in summary.rides_per_rider.iter().enumerate() {
        println!("{:<10} {:>6}", i, rides);
    }
    println!();
    println!("{:<10} {:>6}", "Car", "Rides");
    println!("{}", "-".repeat(17));
    for (i, rides) in summary.rides_per_car.iter().enumerate() {
        println!("{:<10} {:>6}", i, rides);
    }

    Ok(())
}
