//! Park observer trait and the events agents report through it.

use std::fmt;

use bc_core::{CarId, RiderId};
use bc_sync::Ticket;

use crate::{RunSummary, StatusSnapshot};

/// One step of a rider's or a car's cycle.
///
/// `Display` renders the human-readable log line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParkEvent {
    RiderWandering { rider: RiderId },
    RiderJoinedLine { rider: RiderId, ticket: Ticket },
    RiderRiding { rider: RiderId },
    RiderLeft { rider: RiderId },
    CarLoaded { car: CarId, rider: RiderId, ticket: Ticket },
    CarBumping { car: CarId },
    CarUnloaded { car: CarId, rider: RiderId },
    CarParked { car: CarId },
}

impl fmt::Display for ParkEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParkEvent::RiderWandering { rider } => {
                write!(f, "{rider} is wandering around the park.")
            }
            ParkEvent::RiderJoinedLine { rider, .. } => {
                write!(f, "{rider} gets in the waiting line.")
            }
            ParkEvent::RiderRiding { rider } => write!(f, "{rider} is taking the ride."),
            ParkEvent::RiderLeft { rider } => {
                write!(f, "{rider} has left because we're shut down.")
            }
            ParkEvent::CarLoaded { car, rider, .. } => {
                write!(f, "{car} takes the rider {}.", rider.0)
            }
            ParkEvent::CarBumping { car } => write!(f, "{car} is bumping around the arena."),
            ParkEvent::CarUnloaded { car, rider } => {
                write!(f, "This ride of {car} is over. Get out {}.", rider.0)
            }
            ParkEvent::CarParked { car } => write!(f, "{car} is parked for the night."),
        }
    }
}

/// Callbacks invoked by the agent threads and by [`Sim::run`][crate::Sim::run].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Thread safety
///
/// Every rider, every car, and the status thread call into the same observer
/// concurrently, hence `&self` and the `Sync` bound.  Keep the work short:
/// a car blocks its rider for as long as `on_event` takes.
///
/// # Example — event printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl ParkObserver for Printer {
///     fn on_event(&self, event: &ParkEvent) {
///         println!("{event}");
///     }
/// }
/// ```
pub trait ParkObserver: Sync {
    /// Called from an agent thread at each step of its cycle.
    fn on_event(&self, _event: &ParkEvent) {}

    /// Called from the status thread every `display_interval` while the park
    /// is open.
    fn on_status(&self, _snapshot: &StatusSnapshot) {}

    /// Called once after every thread has been joined.
    fn on_sim_end(&self, _summary: &RunSummary) {}
}

/// A [`ParkObserver`] that does nothing.
pub struct NoopObserver;

impl ParkObserver for NoopObserver {}
