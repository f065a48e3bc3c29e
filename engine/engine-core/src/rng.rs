//! Seeded random number generation.
//!
//! Every shuffle and random choice in the engine goes through [`GameRng`] so a
//! game, a search, or a whole match can be replayed from one `u64` seed.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// The RNG used for deck shuffles, rollouts and random agent choices.
pub type GameRng = ChaCha20Rng;

/// Create a generator from a fixed seed.
pub fn seeded(seed: u64) -> GameRng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// Create a generator seeded from the operating system.
pub fn from_entropy() -> GameRng {
    ChaCha20Rng::from_entropy()
}

/// Derive an independent seed for stream `stream` of a base seed.
///
/// Uses the SplitMix64 finalizer so neighbouring streams do not produce
/// correlated generators.
pub fn derive_seed(base: u64, stream: u64) -> u64 {
    let mut z = base.wrapping_add(stream.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
