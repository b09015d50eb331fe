#[allow(unused)]
use crate::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Scale applied to the standard-normal weight draws.
pub const INIT_SCALE: f64 = 0.01;

#[macro_export]
macro_rules! randn_array {
    ($rng:expr, $($x:expr),*) => {
        {
            Array2::<f64>::random_using(($($x,)*), StandardNormal, $rng) * $crate::utils::INIT_SCALE
        }
    };
}

/// Source of the per-epoch permutation applied to the training set.
pub trait Shuffler {
    fn permutation(&mut self, n: usize) -> Vec<usize>;
}

/// Deterministic shuffle: the permutation depends only on `(seed, n)`.
///
/// The generator is reseeded on every call, so shuffling the same dataset
/// twice yields the same order. The trainer applies it to the running
/// (already shuffled) dataset, which still changes the order each epoch.
#[derive(Debug, Clone, Copy)]
pub struct SeededShuffle {
    seed: u64,
}

impl SeededShuffle {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Shuffler for SeededShuffle {
    fn permutation(&mut self, n: usize) -> Vec<usize> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut indices: Vec<usize> = (0..n).collect();
        indices.shuffle(&mut rng);
        indices
    }
}
