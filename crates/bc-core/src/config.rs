//! Park configuration.
//!
//! # Design
//!
//! Everything that shapes a run is fixed before the first thread starts:
//! the cohort sizes, the total number of rides, and the bounds of the random
//! wander and bump intervals.  Nothing here can change while the park is
//! open.
//!
//! Intervals are plain `Duration`s.  A bound of zero disables the
//! corresponding sleep entirely, which is how the tests drive the protocol
//! at full speed.

use std::time::Duration;

use crate::{ParkError, ParkResult};

/// Top-level park configuration.
///
/// Typically built from constants by the application crate (or through
/// `SimBuilder` overrides) and handed to the simulation runner.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParkConfig {
    /// Number of rider threads.  Must be at least 1.
    pub riders: usize,

    /// Number of car threads.  Must be at least 1.
    pub cars: usize,

    /// Total rides to complete before the park shuts down.  Zero shuts the
    /// park before anyone is served.
    pub total_rides: u64,

    /// Upper bound (exclusive) of each wandering interval.
    pub wander_max: Duration,

    /// Upper bound (exclusive) of each bump cycle.
    pub bump_max: Duration,

    /// Time between status snapshots.
    pub display_interval: Duration,

    /// Master RNG seed for the per-agent interval generators.
    pub seed: u64,
}

impl Default for ParkConfig {
    /// Five riders, two cars, ten rides.
    fn default() -> Self {
        Self {
            riders:           5,
            cars:             2,
            total_rides:      10,
            wander_max:       Duration::from_millis(100),
            bump_max:         Duration::from_millis(40),
            display_interval: Duration::from_millis(200),
            seed:             42,
        }
    }
}

impl ParkConfig {
    /// Reject cohorts the ride protocol cannot run.
    ///
    /// With no cars nobody is ever released from the line; with no riders no
    /// car is ever woken.  Both are start-up errors.
    pub fn validate(&self) -> ParkResult<()> {
        if self.riders == 0 {
            return Err(ParkError::Config("at least one rider is required".into()));
        }
        if self.cars == 0 {
            return Err(ParkError::Config("at least one car is required".into()));
        }
        // `u32::MAX` is reserved for the `INVALID` sentinel.
        if self.riders >= u32::MAX as usize {
            return Err(ParkError::Config(format!(
                "{} riders exceeds the rider id space", self.riders
            )));
        }
        if self.cars >= u32::MAX as usize {
            return Err(ParkError::Config(format!(
                "{} cars exceeds the car id space", self.cars
            )));
        }
        Ok(())
    }
}
