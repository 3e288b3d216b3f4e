//! Data loading and dataset containers.
//!
//! This module provides two layers:
//!
//! - [`DataTable`]: the raw tabular layer - a CSV file parsed into typed
//!   columns with missing-value tracking. Rows with missing fields are
//!   removed with [`DataTable::drop_missing`] before any encoding.
//! - [`Dataset`]: the model-facing layer - a feature-major `f32` matrix
//!   with a [`DatasetSchema`] and a label vector of class indices.
//!
//! # Storage Layout
//!
//! `Dataset` features are stored **feature-major**: `[n_features, n_samples]`.
//! Each feature's values across all samples are contiguous in memory.
//!
//! # Missing Values
//!
//! In a `DataTable`, an empty field or a literal `?` is missing. A `Dataset`
//! carries no missing values; it is only assembled from cleaned tables.

mod dataset;
mod schema;
mod table;

pub use dataset::{Dataset, DatasetError};
pub use schema::{DatasetSchema, FeatureMeta, FeatureType};
pub use table::{Column, ColumnPartition, ColumnType, ColumnValues, DataTable, TableError};
