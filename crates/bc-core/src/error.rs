//! Park-level error type.
//!
//! Only start-up conditions are errors here.  A broken synchronization
//! invariant during a run is not recoverable and aborts the process instead.

use thiserror::Error;

/// The error type for `bc-core` and a common base for the other crates.
#[derive(Debug, Error)]
pub enum ParkError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `bc-*` crates.
pub type ParkResult<T> = Result<T, ParkError>;
