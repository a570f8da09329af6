//! Fluent builder for constructing a [`Sim`].

use std::time::Duration;

use bc_core::ParkConfig;

use crate::{Park, Sim, SimResult};

/// Fluent builder for [`Sim`].
///
/// Starts from [`ParkConfig::default()`] (or a supplied config) and lets
/// callers override individual fields.
///
/// | Method                    | Default  |
/// |---------------------------|----------|
/// | `.riders(n)`              | 5        |
/// | `.cars(n)`                | 2        |
/// | `.total_rides(n)`         | 10       |
/// | `.wander_max(d)`          | 100 ms   |
/// | `.bump_max(d)`            | 40 ms    |
/// | `.display_interval(d)`    | 200 ms   |
/// | `.seed(s)`                | 42       |
///
/// # Example
///
/// ```rust,ignore
/// let sim = SimBuilder::new()
///     .riders(5)
///     .cars(2)
///     .total_rides(10)
///     .build()?;
/// let summary = sim.run(&NoopObserver)?;
/// ```
#[derive(Clone, Debug, Default)]
pub struct SimBuilder {
    config: ParkConfig,
}

impl SimBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn from_config(config: ParkConfig) -> Self {
        Self { config }
    }

    pub fn riders(mut self, n: usize) -> Self {
        self.config.riders = n;
        self
    }

    pub fn cars(mut self, n: usize) -> Self {
        self.config.cars = n;
        self
    }

    pub fn total_rides(mut self, n: u64) -> Self {
        self.config.total_rides = n;
        self
    }

    pub fn wander_max(mut self, d: Duration) -> Self {
        self.config.wander_max = d;
        self
    }

    pub fn bump_max(mut self, d: Duration) -> Self {
        self.config.bump_max = d;
        self
    }

    /// Zero disables status snapshots.
    pub fn display_interval(mut self, d: Duration) -> Self {
        self.config.display_interval = d;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Zero out both agent sleeps so the protocol runs flat out.
    pub fn instant(self) -> Self {
        self.wander_max(Duration::ZERO).bump_max(Duration::ZERO)
    }

    /// Validate the configuration and allocate the park.
    pub fn build(self) -> SimResult<Sim> {
        Ok(Sim::new(Park::new(self.config)?))
    }
}
