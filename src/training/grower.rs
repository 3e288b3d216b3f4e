//! Greedy tree growth.
//!
//! [`TreeGrower`] grows one classification tree top-down. At each node it
//! bins the node's rows into the per-feature candidate thresholds, scans the
//! bin histogram once per feature, and takes the split with the best Gini
//! gain. Rows are partitioned stably, so growth is fully deterministic for a
//! given RNG seed and candidate set.

use ndarray::ArrayView2;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::tree::{NodeId, Tree};

use super::binning::SplitCandidates;
use super::sampling::sample_features;

/// Parameters steering growth, shared by both models.
#[derive(Debug, Clone)]
pub(crate) struct GrowerParams {
    /// Maximum depth; the root is at depth 0.
    pub max_depth: u32,
    /// Minimum rows a node needs to be considered for splitting.
    pub min_samples_split: usize,
    /// Total number of classes.
    pub n_classes: usize,
    /// Features examined per split; `None` examines all.
    pub features_per_split: Option<usize>,
}

struct BestSplit {
    feature: u32,
    threshold: f32,
    gain: f64,
}

/// Grows one tree over a fixed feature matrix and label assignment.
pub(crate) struct TreeGrower<'a> {
    /// Feature-major matrix `[n_features, n_samples]`.
    features: ArrayView2<'a, f32>,
    /// Class index per sample.
    classes: &'a [u32],
    candidates: &'a SplitCandidates,
    params: GrowerParams,
    rng: Xoshiro256PlusPlus,
}

impl<'a> TreeGrower<'a> {
    pub fn new(
        features: ArrayView2<'a, f32>,
        classes: &'a [u32],
        candidates: &'a SplitCandidates,
        params: GrowerParams,
        seed: u64,
    ) -> Self {
        Self {
            features,
            classes,
            candidates,
            params,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    /// Grow a tree over the given rows (duplicates allowed, e.g. bootstrap).
    pub fn grow(&mut self, rows: Vec<u32>) -> Tree {
        let mut tree = Tree::new();
        self.grow_node(&mut tree, rows, 0);
        tree
    }

    fn grow_node(&mut self, tree: &mut Tree, rows: Vec<u32>, depth: u32) -> NodeId {
        let counts = self.class_counts(&rows);
        let majority = majority_class(&counts);

        let stop = depth >= self.params.max_depth
            || rows.len() < self.params.min_samples_split
            || is_pure(&counts);
        if stop {
            return tree.push_leaf(majority);
        }

        let Some(split) = self.best_split(&rows, &counts) else {
            return tree.push_leaf(majority);
        };

        let (left_rows, right_rows) = self.partition_rows(rows, split.feature, split.threshold);
        debug_assert!(
            !left_rows.is_empty() && !right_rows.is_empty(),
            "chosen split must separate rows (gain {})",
            split.gain
        );

        let node = tree.push_split(split.feature, split.threshold);
        let left = self.grow_node(tree, left_rows, depth + 1);
        let right = self.grow_node(tree, right_rows, depth + 1);
        tree.set_children(node, left, right);
        node
    }

    fn class_counts(&self, rows: &[u32]) -> Vec<u64> {
        let mut counts = vec![0u64; self.params.n_classes.max(1)];
        for &r in rows {
            counts[self.classes[r as usize] as usize] += 1;
        }
        counts
    }

    /// Scan every candidate threshold of the considered features and return
    /// the split with the highest Gini gain.
    ///
    /// Ties keep the first candidate encountered (lowest feature index, then
    /// lowest threshold), so the choice is deterministic.
    fn best_split(&mut self, rows: &[u32], total_counts: &[u64]) -> Option<BestSplit> {
        let n_features = self.features.nrows();
        let considered: Vec<usize> = match self.params.features_per_split {
            Some(k) => sample_features(n_features, k, &mut self.rng),
            None => (0..n_features).collect(),
        };

        let n_classes = self.params.n_classes.max(1);
        let n_total = rows.len() as u64;
        let parent_impurity = gini(total_counts, n_total);

        let mut best: Option<BestSplit> = None;
        for feature in considered {
            let thresholds = self.candidates.thresholds(feature);
            if thresholds.is_empty() {
                continue;
            }

            // Histogram over bins: bin(v) = number of thresholds <= v, so
            // splitting at thresholds[k] sends bins 0..=k left.
            let n_bins = thresholds.len() + 1;
            let mut hist = vec![0u64; n_bins * n_classes];
            let values = self.features.row(feature);
            for &r in rows {
                let bin = thresholds.partition_point(|&t| t <= values[r as usize]);
                hist[bin * n_classes + self.classes[r as usize] as usize] += 1;
            }

            let mut left = vec![0u64; n_classes];
            for (k, &threshold) in thresholds.iter().enumerate() {
                for (class, count) in left.iter_mut().enumerate() {
                    *count += hist[k * n_classes + class];
                }
                let n_left: u64 = left.iter().sum();

                let n_right = n_total - n_left;
                if n_left == 0 || n_right == 0 {
                    continue;
                }

                let right: Vec<u64> = total_counts
                    .iter()
                    .zip(&left)
                    .map(|(&t, &l)| t - l)
                    .collect();

                let weighted = (n_left as f64 / n_total as f64) * gini(&left, n_left)
                    + (n_right as f64 / n_total as f64) * gini(&right, n_right);
                let gain = parent_impurity - weighted;

                // Zero-gain splits are permitted (min info gain is 0); a
                // candidate only has to separate the rows. Ties keep the
                // first candidate, so growth stays deterministic.
                if gain >= 0.0 && best.as_ref().map_or(true, |b| gain > b.gain) {
                    best = Some(BestSplit {
                        feature: feature as u32,
                        threshold,
                        gain,
                    });
                }
            }
        }
        best
    }

    /// Stable partition of rows by `value < threshold`.
    fn partition_rows(&self, rows: Vec<u32>, feature: u32, threshold: f32) -> (Vec<u32>, Vec<u32>) {
        let values = self.features.row(feature as usize);
        rows.into_iter()
            .partition(|&r| values[r as usize] < threshold)
    }
}

/// Gini impurity of a class count vector.
fn gini(counts: &[u64], total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total;
            p * p
        })
        .sum::<f64>()
}

/// Class with the highest count; ties go to the lowest class index.
fn majority_class(counts: &[u64]) -> u32 {
    let mut best_class = 0u32;
    let mut best_count = 0u64;
    for (class, &count) in counts.iter().enumerate() {
        if count > best_count {
            best_count = count;
            best_class = class as u32;
        }
    }
    best_class
}

/// True if at most one class is present.
fn is_pure(counts: &[u64]) -> bool {
    counts.iter().filter(|&&c| c > 0).count() <= 1
}
