//! Single decision tree classifier.
//!
//! [`DecisionTreeParams`] provides a validated builder (via `bon`);
//! [`DecisionTreeModel::fit`] grows one CART-style tree by Gini gain over
//! binned split candidates.
//!
//! # Example
//!
//! ```ignore
//! use tabtrees::{DecisionTreeModel, DecisionTreeParams};
//!
//! let params = DecisionTreeParams::builder()
//!     .max_depth(5)
//!     .max_bins(100)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! let model = DecisionTreeModel::fit(&train, params).unwrap();
//! let predictions = model.predict(&test);
//! ```

use bon::Builder;
use ndarray::Array1;

use crate::data::Dataset;
use crate::tree::Tree;

use super::binning::SplitCandidates;
use super::grower::{GrowerParams, TreeGrower};
use super::logger::{TrainingLogger, Verbosity};
use super::{class_labels, ParamError, TrainError};

/// Configuration for decision tree training.
#[derive(Debug, Clone, Builder)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
pub struct DecisionTreeParams {
    /// Maximum tree depth (root at depth 0). Default: 5.
    #[builder(default = 5)]
    pub max_depth: u32,

    /// Cap on split candidates considered per feature. Default: 32.
    #[builder(default = 32)]
    pub max_bins: usize,

    /// Minimum samples a node needs to be split. Default: 2.
    #[builder(default = 2)]
    pub min_samples_split: usize,

    /// Random seed. Default: 42.
    ///
    /// A single tree examines every feature at every split, so the seed only
    /// pins down the grower's RNG state; growth is deterministic either way.
    #[builder(default = 42)]
    pub seed: u64,

    /// Verbosity level. Default: `Silent`.
    #[builder(default)]
    pub verbosity: Verbosity,
}

/// Custom finishing function that validates the params.
impl<S: decision_tree_params_builder::IsComplete> DecisionTreeParamsBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError`] if `max_depth == 0`, `max_bins < 2`, or
    /// `min_samples_split < 2`.
    pub fn build(self) -> Result<DecisionTreeParams, ParamError> {
        let params = self.__build_internal();
        params.validate()?;
        Ok(params)
    }
}

impl DecisionTreeParams {
    fn validate(&self) -> Result<(), ParamError> {
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

impl Default for DecisionTreeParams {
    fn default() -> Self {
        Self::builder().build().expect("default params are valid")
    }
}

/// A trained decision tree classifier.
#[derive(Debug, Clone)]
pub struct DecisionTreeModel {
    tree: Tree,
    n_classes: usize,
    n_features: usize,
}

impl DecisionTreeModel {
    /// Fit a tree on a labelled dataset.
    ///
    /// # Errors
    ///
    /// Returns [`TrainError`] if the dataset is empty, has no labels, or
    /// labels are not non-negative integer class indices.
    pub fn fit(dataset: &Dataset, params: DecisionTreeParams) -> Result<Self, TrainError> {
        let (classes, n_classes) = class_labels(dataset)?;

        let logger = TrainingLogger::new(params.verbosity);
        logger.start_training("decision tree", 1, dataset.n_samples());

        let candidates = SplitCandidates::from_dataset(dataset, params.max_bins);
        let grower_params = GrowerParams {
            max_depth: params.max_depth,
            min_samples_split: params.min_samples_split,
            n_classes,
            features_per_split: None,
        };
        let mut grower = TreeGrower::new(
            dataset.features(),
            &classes,
            &candidates,
            grower_params,
            params.seed,
        );
        let rows: Vec<u32> = (0..dataset.n_samples() as u32).collect();
        let tree = grower.grow(rows);

        logger.finish_training("decision tree", tree.n_nodes());

        Ok(Self {
            tree,
            n_classes,
            n_features: dataset.n_features(),
        })
    }

    /// Predict a class index for every sample.
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
                self.tree.predict(|f| sample[f]) as f32
            })
            .collect()
    }

    /// The underlying tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Number of classes seen during fit.
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }
}
