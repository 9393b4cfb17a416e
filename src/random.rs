//! Seedable random number generation.
//!
//! Every stochastic component takes an explicit RNG; nothing reads ambient
//! global state, so equal seeds reproduce equal runs.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic RNG from a seed.
#[inline]
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Resolves an optional seed, drawing a fresh one from the OS-seeded
/// thread RNG when absent.
#[inline]
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}

/// Seed for the `k`-th independent run derived from a base seed.
#[inline]
pub fn derive_seed(base: u64, k: usize) -> u64 {
    base.wrapping_add(k as u64)
}
