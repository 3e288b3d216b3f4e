//! tabtrees: decision tree and random forest classifiers for tabular data.
//!
//! The crate covers the full path from a delimited text file to evaluated
//! classification models:
//!
//! - [`DataTable`] - CSV loading with per-column type inference and
//!   null-row cleaning
//! - [`StringIndexer`] / [`FeatureAssembler`] - categorical encoding and
//!   feature-vector assembly
//! - [`Dataset`] - feature-major matrix container with schema
//! - [`train_test_split`] - seeded, reproducible row partitioning
//! - [`DecisionTreeModel`] / [`RandomForestModel`] - CART-style classifiers
//!   configured through validated builders
//! - [`MulticlassAccuracy`] - evaluation
//!
//! # Training
//!
//! Use `DecisionTreeParams::builder()` / `RandomForestParams::builder()` to
//! configure, then `DecisionTreeModel::fit()` / `RandomForestModel::fit()`.
//! See the [`training`] module for details.

// Re-export approx traits for users who want to compare predictions
pub use approx;

pub mod data;
pub mod encode;
pub mod split;
pub mod training;
pub mod tree;
pub mod utils;

// =============================================================================
// Convenience Re-exports
// =============================================================================

// Data handling
pub use data::{
    ColumnPartition, ColumnType, DataTable, Dataset, DatasetError, DatasetSchema, FeatureMeta,
    FeatureType, TableError,
};

// Encoding
pub use encode::{AssembleError, FeatureAssembler, IndexerError, StringIndexer};

// Splitting
pub use split::{train_test_split, SplitError};

// Models, metrics, and their configuration
pub use training::{
    DecisionTreeModel, DecisionTreeParams, MetricFn, MulticlassAccuracy, ParamError,
    RandomForestModel, RandomForestParams, TrainError, Verbosity,
};

// Shared utilities
pub use utils::{run_with_threads, Parallelism};
