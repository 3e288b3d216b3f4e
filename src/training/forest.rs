//! Random forest classifier.
//!
//! Each tree trains on a bootstrap sample of the rows and draws a fresh
//! feature subset at every split. Trees vote; the majority class wins, ties
//! going to the lowest class index.
//!
//! Training is parallel across trees. Every tree derives its own seed from
//! the forest seed and its index, so the result is identical whatever the
//! thread count or scheduling.

use std::num::NonZeroUsize;

use bon::Builder;
use ndarray::Array1;

use crate::data::Dataset;
use crate::tree::Tree;
use crate::utils::run_with_threads;

use super::binning::SplitCandidates;
use super::grower::{GrowerParams, TreeGrower};
use super::logger::{TrainingLogger, Verbosity};
use super::sampling::bootstrap_sample;
use super::{class_labels, ParamError, TrainError};

/// Configuration for random forest training.
#[derive(Debug, Clone, Builder)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
pub struct RandomForestParams {
    /// Number of trees in the ensemble. Default: 100.
    #[builder(default = 100)]
    pub n_trees: u32,

    /// Maximum depth per tree (root at depth 0). Default: 5.
    #[builder(default = 5)]
    pub max_depth: u32,

    /// Cap on split candidates considered per feature. Default: 32.
    #[builder(default = 32)]
    pub max_bins: usize,

    /// Minimum samples a node needs to be split. Default: 2.
    #[builder(default = 2)]
    pub min_samples_split: usize,

    /// Features drawn per split. `None` = `ceil(sqrt(n_features))`.
    pub colsample_split: Option<NonZeroUsize>,

    /// Number of threads. `0` = auto, `1` = sequential, `n` = exactly `n`.
    #[builder(default = 0)]
    pub n_threads: usize,

    /// Random seed; tree `t` uses `seed + t`. Default: 42.
    #[builder(default = 42)]
    pub seed: u64,

    /// Verbosity level. Default: `Silent`.
    #[builder(default)]
    pub verbosity: Verbosity,
}

/// Custom finishing function that validates the params.
impl<S: random_forest_params_builder::IsComplete> RandomForestParamsBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError`] if `n_trees == 0`, `max_depth == 0`,
    /// `max_bins < 2`, or `min_samples_split < 2`.
    pub fn build(self) -> Result<RandomForestParams, ParamError> {
        let params = self.__build_internal();
        params.validate()?;
        Ok(params)
    }
}

impl RandomForestParams {
    fn validate(&self) -> Result<(), ParamError> {
        if self.n_trees == 0 {
            return Err(ParamError::InvalidNTrees(self.n_trees));
        }
        if self.max_depth == 0 {
            return Err(ParamError::InvalidMaxDepth(self.max_depth));
        }
        if self.max_bins < 2 {
            return Err(ParamError::InvalidMaxBins(self.max_bins));
        }
        if self.min_samples_split < 2 {
            return Err(ParamError::InvalidMinSamplesSplit(self.min_samples_split));
        }
        Ok(())
    }
}

impl Default for RandomForestParams {
    fn default() -> Self {
        Self::builder().build().expect("default params are valid")
    }
}

/// A trained random forest classifier.
#[derive(Debug, Clone)]
pub struct RandomForestModel {
    trees: Vec<Tree>,
    n_classes: usize,
    n_features: usize,
}

impl RandomForestModel {
    /// Fit an ensemble on a labelled dataset.
    ///
    /// # Errors
    ///
    /// Returns [`TrainError`] if the dataset is empty, has no labels, or
    /// labels are not non-negative integer class indices.
    pub fn fit(dataset: &Dataset, params: RandomForestParams) -> Result<Self, TrainError> {
        let (classes, n_classes) = class_labels(dataset)?;

        let logger = TrainingLogger::new(params.verbosity);
        logger.start_training("random forest", params.n_trees as usize, dataset.n_samples());

        let candidates = SplitCandidates::from_dataset(dataset, params.max_bins);
        let n_samples = dataset.n_samples();
        let n_features = dataset.n_features();
        let features_per_split = params
            .colsample_split
            .map(NonZeroUsize::get)
            .unwrap_or_else(|| (n_features as f64).sqrt().ceil() as usize)
            .clamp(1, n_features);

        let features = dataset.features();
        let classes = &classes;
        let candidates = &candidates;
        let params_ref = &params;

        let trees = run_with_threads(params.n_threads, |parallelism| {
            parallelism.maybe_par_map(0..params_ref.n_trees, |t| {
                let tree_seed = params_ref.seed.wrapping_add(t as u64);
                let rows = bootstrap_sample(n_samples, tree_seed);
                let grower_params = GrowerParams {
                    max_depth: params_ref.max_depth,
                    min_samples_split: params_ref.min_samples_split,
                    n_classes,
                    features_per_split: Some(features_per_split),
                };
                let mut grower =
                    TreeGrower::new(features, classes, candidates, grower_params, tree_seed);
                grower.grow(rows)
            })
        });

        logger.finish_training("random forest", trees.iter().map(Tree::n_nodes).sum());

        Ok(Self {
            trees,
            n_classes,
            n_features,
        })
    }

    /// Predict a class index for every sample by majority vote.
    ///
    /// Ties go to the lowest class index.
    ///
    /// # Panics
    ///
    /// Panics if the dataset's feature count differs from the training set.
    pub fn predict(&self, dataset: &Dataset) -> Array1<f32> {
        assert_eq!(
            dataset.n_features(),
            self.n_features,
            "dataset has {} features, model was trained on {}",
            dataset.n_features(),
            self.n_features
        );

        (0..dataset.n_samples())
            .map(|j| {
                let sample = dataset.sample(j);
                let mut votes = vec![0u32; self.n_classes.max(1)];
                for tree in &self.trees {
                    votes[tree.predict(|f| sample[f]) as usize] += 1;
                }

                let mut best_class = 0usize;
                let mut best_votes = 0u32;
                for (class, &count) in votes.iter().enumerate() {
                    if count > best_votes {
                        best_votes = count;
                        best_class = class;
                    }
                }
                best_class as f32
            })
            .collect()
    }

    /// Number of trees in the ensemble.
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Number of classes seen during fit.
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }
}
