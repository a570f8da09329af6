//! `bc-core` — foundational types for the bumper-car park simulation.
//!
//! Every other `bc-*` crate depends on this one.  It has no `bc-*`
//! dependencies and only `rand` and `thiserror` externally (plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `RiderId`, `CarId`                                    |
//! | [`config`]      | `ParkConfig` and its validation                       |
//! | [`rng`]         | `AgentRng` (per rider / per car)                      |
//! | [`error`]       | `ParkError`, `ParkResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids and `ParkConfig`.    |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::ParkConfig;
pub use error::{ParkError, ParkResult};
pub use ids::{CarId, RiderId};
pub use rng::AgentRng;
