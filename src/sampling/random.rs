//! Seeded random sources, one independent stream per token

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// Odd 64-bit constant (golden ratio) spreads consecutive token ids across the seed space
const TOKEN_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Seeded random selector for reproducible trait draws
///
/// Each token gets its own stream derived from the batch seed and the token
/// identifier, so a token's draws never depend on which worker rendered it or
/// in which order tokens completed.
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic selector from a raw seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create the selector for one token of a seeded batch
    pub fn for_token(seed: u64, token_id: u64) -> Self {
        Self::new(mix_token_seed(seed, token_id))
    }

    /// Uniform roll in `0..bound`
    ///
    /// Returns 0 when `bound` is 0.
    pub fn roll(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.rng.random_range(0..bound)
    }

    /// Access the underlying generator
    pub const fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

/// Combine a batch seed and a token identifier into a token seed
pub const fn mix_token_seed(seed: u64, token_id: u64) -> u64 {
    let mut z = seed ^ token_id.wrapping_add(1).wrapping_mul(TOKEN_STRIDE);
    // splitmix64 finalizer
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
