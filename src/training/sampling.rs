//! Row and feature sampling for forest training.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Draw a bootstrap sample: `n_rows` row indices with replacement.
///
/// Indices are sorted for cache-friendly access; multiplicity is what
/// matters, not order. Reproducible for a given seed.
pub fn bootstrap_sample(n_rows: usize, seed: u64) -> Vec<u32> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut rows: Vec<u32> = (0..n_rows)
        .map(|_| rng.gen_range(0..n_rows) as u32)
        .collect();
    rows.sort_unstable();
    rows
}

/// Sample `k` feature indices without replacement.
///
/// Uses a partial Fisher-Yates shuffle; returns sorted indices. When
/// `k >= n_features` every feature is returned.
pub fn sample_features(n_features: usize, k: usize, rng: &mut Xoshiro256PlusPlus) -> Vec<usize> {
    if k >= n_features {
        return (0..n_features).collect();
    }

    let mut indices: Vec<usize> = (0..n_features).collect();
    for i in 0..k {
        let j = rng.gen_range(i..n_features);
        indices.swap(i, j);
    }

    let mut sampled = indices[..k].to_vec();
    sampled.sort_unstable();
    sampled
}
