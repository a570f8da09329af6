//! Deterministic per-agent RNG.
//!
//! # Determinism strategy
//!
//! Every rider and every car owns an independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (id * MIXING_CONSTANT) XOR role_salt
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive ids uniformly across the seed space.  The role
//! salt keeps rider 0 and car 0 on different streams.  Each generator is moved
//! into its agent's thread, so drawing an interval never touches shared state.
//!
//! Thread scheduling is not deterministic, so a fixed seed reproduces the
//! sequence of intervals each agent draws, not the interleaving of a run.

use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{CarId, RiderId};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

const RIDER_SALT: u64 = 0x5249_4445_5200_0000;
const CAR_SALT:   u64 = 0x4341_5200_0000_0000;

/// Per-agent deterministic RNG.
///
/// The type is deliberately not shared: each agent thread receives its own
/// by value when it is spawned.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed the generator for one rider.
    pub fn for_rider(global_seed: u64, rider: RiderId) -> Self {
        Self::mixed(global_seed, rider.0 as u64, RIDER_SALT)
    }

    /// Seed the generator for one car.
    pub fn for_car(global_seed: u64, car: CarId) -> Self {
        Self::mixed(global_seed, car.0 as u64, CAR_SALT)
    }

    fn mixed(global_seed: u64, id: u64, salt: u64) -> Self {
        let seed = global_seed ^ id.wrapping_mul(MIXING_CONSTANT) ^ salt;
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Draw a duration uniformly from `[0, max)`.
    ///
    /// A zero `max` always yields `Duration::ZERO`, which is how tests run the
    /// park without any sleeping.
    pub fn interval(&mut self, max: Duration) -> Duration {
        let max_micros = u64::try_from(max.as_micros()).unwrap_or(u64::MAX);
        if max_micros == 0 {
            return Duration::ZERO;
        }
        Duration::from_micros(self.0.gen_range(0..max_micros))
    }
}
