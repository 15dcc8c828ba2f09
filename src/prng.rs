use rand::rngs::SmallRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Single deterministic draw source for the whole simulation (`spec.md` §4.1).
///
/// Every random choice in the core — sex at birth, mortality ages, market
/// jitter, matchmaking scores — goes through this one instance, so a fixed
/// seed reproduces an identical run byte-for-byte.
pub struct Prng {
    rng: SmallRng,
}

impl Prng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Uniform draw in `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.rng.random_range(0.0..1.0)
    }

    /// Uniform draw in `[a, b)`.
    pub fn uniform_range(&mut self, a: f64, b: f64) -> f64 {
        if a >= b {
            return a;
        }
        self.rng.random_range(a..b)
    }

    /// Gaussian draw with the given mean and standard deviation.
    pub fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        if std_dev <= 0.0 {
            return mean;
        }
        Normal::new(mean, std_dev)
            .expect("finite mean/std_dev")
            .sample(&mut self.rng)
    }

    /// `true` with probability `p` (clamped to `[0, 1]`).
    pub fn bernoulli(&mut self, p: f64) -> bool {
        self.uniform() < p.clamp(0.0, 1.0)
    }

    /// Pick one element uniformly at random. `None` if `items` is empty.
    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    /// Shuffle `items` in place (Fisher-Yates).
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}
