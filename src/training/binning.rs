//! Split-candidate binning.
//!
//! Trees do not test every observed value: each feature's candidate
//! thresholds are computed once per fit and capped at `max_bins`, which
//! bounds the distinct values considered when splitting a node. Below the
//! cap, candidates are the midpoints between consecutive distinct sorted
//! values; above it, they sit at `max_bins`-quantile positions of the
//! distinct values.

use ndarray::ArrayView1;

use crate::data::Dataset;

/// Per-feature candidate split thresholds.
///
/// Thresholds for each feature are strictly increasing. A feature with fewer
/// than two distinct values has no candidates and can never be split on.
#[derive(Debug, Clone)]
pub struct SplitCandidates {
    per_feature: Vec<Vec<f32>>,
}

impl SplitCandidates {
    /// Compute candidates for every feature of a dataset.
    pub fn from_dataset(dataset: &Dataset, max_bins: usize) -> Self {
        let per_feature = (0..dataset.n_features())
            .map(|f| candidate_thresholds(dataset.feature(f), max_bins))
            .collect();
        Self { per_feature }
    }

    /// Number of features covered.
    pub fn n_features(&self) -> usize {
        self.per_feature.len()
    }

    /// Candidate thresholds for one feature, ascending.
    #[inline]
    pub fn thresholds(&self, feature: usize) -> &[f32] {
        &self.per_feature[feature]
    }
}

/// Midpoint of two consecutive distinct values, guaranteed to separate them.
fn midpoint(lo: f32, hi: f32) -> f32 {
    let mid = lo + (hi - lo) / 2.0;
    // Rounding can collapse the midpoint onto `lo`; `hi` still separates
    // since routing is `value < threshold`.
    if mid > lo {
        mid
    } else {
        hi
    }
}

fn candidate_thresholds(values: ArrayView1<'_, f32>, max_bins: usize) -> Vec<f32> {
    let mut distinct: Vec<f32> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    distinct.sort_by(f32::total_cmp);
    distinct.dedup();

    let n = distinct.len();
    if n < 2 {
        return Vec::new();
    }

    if n <= max_bins {
        return distinct.windows(2).map(|w| midpoint(w[0], w[1])).collect();
    }

    // More distinct values than bins: thresholds at quantile positions.
    let mut cuts: Vec<f32> = (1..max_bins)
        .map(|k| {
            let pos = k * n / max_bins;
            midpoint(distinct[pos - 1], distinct[pos])
        })
        .collect();
    cuts.dedup();
    cuts
}
