//! Seeded train/test splitting.
//!
//! Rows are assigned independently: one `Xoshiro256PlusPlus` generator is
//! seeded from the split seed and drives a single draw per row in row order,
//! so the same seed and the same row order always reproduce the same split.
//! The two sides are disjoint and exhaustive. No stratification.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::data::Dataset;

/// Errors produced by [`train_test_split`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SplitError {
    /// The train fraction must lie strictly between 0 and 1.
    #[error("train_fraction must be in (0, 1), got {0}")]
    InvalidFraction(f64),
}

/// Compute the train/test row indices for `n_rows` rows.
///
/// Each row lands in train with probability `train_fraction`. Row order is
/// preserved within each side.
pub fn split_indices(n_rows: usize, train_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();
    for row in 0..n_rows {
        if rng.gen::<f64>() < train_fraction {
            train.push(row);
        } else {
            test.push(row);
        }
    }
    (train, test)
}

/// Randomly partition a dataset into train and test sets.
///
/// # Errors
///
/// [`SplitError::InvalidFraction`] unless `0 < train_fraction < 1`.
pub fn train_test_split(
    dataset: &Dataset,
    train_fraction: f64,
    seed: u64,
) -> Result<(Dataset, Dataset), SplitError> {
    if !(train_fraction > 0.0 && train_fraction < 1.0) {
        return Err(SplitError::InvalidFraction(train_fraction));
    }

    let (train_idx, test_idx) = split_indices(dataset.n_samples(), train_fraction, seed);
    Ok((
        dataset.select_rows(&train_idx),
        dataset.select_rows(&test_idx),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DatasetSchema, FeatureMeta};
    use ndarray::{Array1, Array2};

    fn numbered_dataset(n: usize) -> Dataset {
        // One feature whose value is the row index, so rows stay identifiable.
        let features =
            Array2::from_shape_vec((1, n), (0..n).map(|i| i as f32).collect()).unwrap();
        let labels = Array1::from_vec(vec![0.0; n]);
        let schema = DatasetSchema::from_features(vec![FeatureMeta::numeric("row_id")]);
        Dataset::new(features, schema, Some(labels)).unwrap()
    }

    #[test]
    fn split_is_disjoint_and_exhaustive() {
        let (train, test) = split_indices(100, 0.8, 42);
        assert_eq!(train.len() + test.len(), 100);

        let mut all: Vec<usize> = train.iter().chain(test.iter()).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn split_is_reproducible() {
        let a = split_indices(500, 0.8, 42);
        let b = split_indices(500, 0.8, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let a = split_indices(500, 0.8, 42);
        let b = split_indices(500, 0.8, 43);
        assert_ne!(a, b);
    }

    #[test]
    fn row_order_is_preserved_within_sides() {
        let (train, test) = split_indices(200, 0.5, 7);
        assert!(train.windows(2).all(|w| w[0] < w[1]));
        assert!(test.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn dataset_split_carries_rows_and_labels() {
        let ds = numbered_dataset(50);
        let (train, test) = train_test_split(&ds, 0.8, 42).unwrap();
        assert_eq!(train.n_samples() + test.n_samples(), 50);

        // Row identities survive the split with no overlap.
        let mut seen: Vec<i64> = train
            .feature(0)
            .iter()
            .chain(test.feature(0).iter())
            .map(|&v| v as i64)
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..50).collect::<Vec<_>>());

        assert!(train.has_labels());
        assert!(test.has_labels());
    }

    #[test]
    fn invalid_fractions_are_rejected() {
        let ds = numbered_dataset(10);
        for fraction in [0.0, 1.0, -0.1, 1.5] {
            assert!(matches!(
                train_test_split(&ds, fraction, 42),
                Err(SplitError::InvalidFraction(_))
            ));
        }
    }
}
