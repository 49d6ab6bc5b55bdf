//! Seedable random number generation.
//!
//! Every stochastic step of a run draws from a single generator created
//! here, so a fixed seed reproduces the whole trace.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic generator from a 64-bit seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
