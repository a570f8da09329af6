//! `bc-sync` — the shared synchronization state of the bumper-car park.
//!
//! Every type here is `Sync` and is meant to be borrowed by many threads at
//! once.  Blocking is always done on a [`Signal`] (mutex + condvar counting
//! semaphore), never by polling.
//!
//! | Module        | Contents                                             |
//! |---------------|------------------------------------------------------|
//! | [`signal`]    | `Signal` — counting semaphore                        |
//! | [`wait_line`] | `WaitLine`, `Ticket` — FIFO of waiting riders        |
//! | [`slots`]     | `RendezvousSlots` — per-rider begin/end hand-off     |
//! | [`counter`]   | `RideCounter`, `Claim` — countdown and shutdown      |

pub mod counter;
pub mod signal;
pub mod slots;
pub mod wait_line;


pub use counter::{Claim, RideCounter};
pub use signal::Signal;
pub use slots::RendezvousSlots;
pub use wait_line::{Ticket, WaitLine};
