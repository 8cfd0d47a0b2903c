//! Seeded random number generators.
//!
//! Every parallel task gets its own generator derived from the run seed and
//! a task identity, so runs are reproducible and workers never share a
//! generator.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a generator for the driving thread of a run.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates an independent generator for task `worker` of a run seeded with
/// `seed`.
pub fn worker_rng(seed: u64, worker: u64) -> StdRng {
    StdRng::seed_from_u64(splitmix64(seed ^ splitmix64(worker)))
}

/// Resolves an optional run seed, drawing a fresh one when absent.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}

// SplitMix64 finalizer (Steele, Lea & Flood 2014).
fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
