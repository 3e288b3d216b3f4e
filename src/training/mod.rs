//! Training infrastructure for tree classifiers.
//!
//! ## Models
//!
//! - [`DecisionTreeModel`]: a single CART-style tree grown by Gini gain
//! - [`RandomForestModel`]: an ensemble of trees on bootstrap samples with
//!   per-node feature subsampling, combined by majority vote
//!
//! ## Shared Infrastructure
//!
//! - [`SplitCandidates`]: per-feature split thresholds capped at `max_bins`
//! - [`MetricFn`], [`MulticlassAccuracy`]: evaluation
//! - [`TrainingLogger`], [`Verbosity`]: training progress logging

mod binning;
mod decision_tree;
mod forest;
mod grower;
mod logger;
mod metrics;
mod sampling;

pub use binning::SplitCandidates;
pub use decision_tree::{DecisionTreeModel, DecisionTreeParams};
pub use forest::{RandomForestModel, RandomForestParams};
pub use logger::{TrainingLogger, Verbosity};
pub use metrics::{MetricFn, MulticlassAccuracy};
pub use sampling::{bootstrap_sample, sample_features};

use crate::data::Dataset;

// =============================================================================
// Errors
// =============================================================================

/// Parameter validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamError {
    /// max_depth must be >= 1.
    #[error("max_depth must be at least 1, got {0}")]
    InvalidMaxDepth(u32),

    /// max_bins must be >= 2.
    #[error("max_bins must be at least 2, got {0}")]
    InvalidMaxBins(usize),

    /// min_samples_split must be >= 2.
    #[error("min_samples_split must be at least 2, got {0}")]
    InvalidMinSamplesSplit(usize),

    /// n_trees must be >= 1.
    #[error("n_trees must be at least 1, got {0}")]
    InvalidNTrees(u32),
}

/// Errors produced while fitting a model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrainError {
    /// The dataset has no samples (e.g. everything was dropped as missing).
    #[error("cannot train on an empty dataset")]
    EmptyDataset,

    /// The dataset carries no label vector.
    #[error("dataset has no labels")]
    MissingLabels,

    /// A label is not a non-negative integer class index.
    #[error("label {value} at sample {sample} is not a class index")]
    InvalidLabel { sample: usize, value: f32 },
}

/// Extract labels as class indices, with the implied class count.
pub(crate) fn class_labels(dataset: &Dataset) -> Result<(Vec<u32>, usize), TrainError> {
    if dataset.n_samples() == 0 {
        return Err(TrainError::EmptyDataset);
    }
    let labels = dataset.labels().ok_or(TrainError::MissingLabels)?;

    let mut classes = Vec::with_capacity(labels.len());
    for (sample, &value) in labels.iter().enumerate() {
        if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
            return Err(TrainError::InvalidLabel { sample, value });
        }
        classes.push(value as u32);
    }
    let n_classes = classes.iter().max().map_or(0, |&m| m as usize + 1);
    Ok((classes, n_classes))
}
