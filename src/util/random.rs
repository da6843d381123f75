use rand::{rngs::SmallRng, Rng, SeedableRng};

/// Uniform integer source, one per worker thread.
pub struct RandomGenerator {
    rng: SmallRng,
}

impl RandomGenerator {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Deterministic generator for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Uniform value in the closed range `[low, high]`. Panics if `low > high`.
    pub fn between(&mut self, low: u64, high: u64) -> u64 {
        self.rng.gen_range(low..=high)
    }

    /// Uniform key in `[1, keyspace]`.
    pub fn key(&mut self, keyspace: u64) -> u64 {
        self.between(1, keyspace)
    }

    /// Uniform percentile in `[1, 100]`.
    pub fn percentile(&mut self) -> u32 {
        self.between(1, 100) as u32
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}
