//! `bc-sim` — thread orchestration for the bumper-car park.
//!
//! # One thread per entity
//!
//! ```text
//! rider r (×riders):              car c (×cars):
//!   loop:                           loop:
//!     wander                          wait "rider present"
//!     [closed?] leave                 [closed? / no claim left] park
//!     enqueue r ───────────────────►  dequeue r, seat it
//!     wait begin[r] ◄──────────────── signal begin[r]
//!     [closed?] leave                 bump
//!     wait end[r]   ◄──────────────── signal end[r]
//!     [closed?] leave                 count down; [closed?] park
//! ```
//!
//! A status thread reads the per-car and per-rider cells without locking and
//! reports snapshots until the countdown ends.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use bc_sim::{NoopObserver, SimBuilder};
//!
//! let sim = SimBuilder::new().riders(5).cars(2).total_rides(10).build()?;
//! let summary = sim.run(&NoopObserver)?;
//! assert_eq!(summary.rides_completed, 10);
//! ```

pub mod builder;
pub mod car;
pub mod error;
pub mod observer;
pub mod park;
pub mod rider;
pub mod sim;
pub mod status;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use car::CarAgent;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, ParkEvent, ParkObserver};
pub use park::Park;
pub use rider::RiderAgent;
pub use sim::{RunSummary, Sim};
pub use status::{RiderState, StatusSnapshot};
