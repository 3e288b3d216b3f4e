//! Dataset container.
//!
//! This module provides [`Dataset`], the model-facing data container.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use super::schema::DatasetSchema;

/// Errors produced while constructing a [`Dataset`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DatasetError {
    /// No feature columns were provided.
    #[error("dataset must have at least one feature")]
    EmptyFeatures,

    /// A component has the wrong sample count.
    #[error("{field} has {got} entries, expected {expected}")]
    ShapeMismatch {
        expected: usize,
        got: usize,
        field: &'static str,
    },
}

/// The assembled dataset consumed by the classifiers.
///
/// # Storage Layout
///
/// Features are stored in **feature-major** layout: `[n_features, n_samples]`.
/// Each feature's values across all samples are contiguous in memory.
///
/// Labels, when present, are class indices (`0.0, 1.0, ...`) as assigned by
/// the label [`StringIndexer`](crate::encode::StringIndexer).
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Feature data: `[n_features, n_samples]` (feature-major).
    features: Array2<f32>,

    /// Feature metadata.
    schema: DatasetSchema,

    /// Label values: length = n_samples.
    labels: Option<Array1<f32>>,
}

impl Dataset {
    /// Create a dataset from feature-major data.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if no features are present, if the schema
    /// does not describe exactly the feature rows, or if the label length
    /// differs from the sample count.
    pub fn new(
        features: Array2<f32>,
        schema: DatasetSchema,
        labels: Option<Array1<f32>>,
    ) -> Result<Self, DatasetError> {
        let n_features = features.nrows();
        let n_samples = features.ncols();

        if n_features == 0 {
            return Err(DatasetError::EmptyFeatures);
        }
        if schema.n_features() != n_features {
            return Err(DatasetError::ShapeMismatch {
                expected: n_features,
                got: schema.n_features(),
                field: "schema",
            });
        }
        if let Some(ref l) = labels {
            if l.len() != n_samples {
                return Err(DatasetError::ShapeMismatch {
                    expected: n_samples,
                    got: l.len(),
                    field: "labels",
                });
            }
        }

        Ok(Self {
            features,
            schema,
            labels,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of samples.
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.features.ncols()
    }

    /// Number of features.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.features.nrows()
    }

    /// Get the schema.
    pub fn schema(&self) -> &DatasetSchema {
        &self.schema
    }

    /// Check if dataset has labels.
    pub fn has_labels(&self) -> bool {
        self.labels.is_some()
    }

    /// Get a view of the feature data.
    ///
    /// Shape: `[n_features, n_samples]` (feature-major).
    pub fn features(&self) -> ArrayView2<'_, f32> {
        self.features.view()
    }

    /// Get one feature's values across all samples.
    #[inline]
    pub fn feature(&self, index: usize) -> ArrayView1<'_, f32> {
        self.features.row(index)
    }

    /// Get one sample's values across all features.
    #[inline]
    pub fn sample(&self, index: usize) -> ArrayView1<'_, f32> {
        self.features.column(index)
    }

    /// Get the label vector, if present.
    pub fn labels(&self) -> Option<ArrayView1<'_, f32>> {
        self.labels.as_ref().map(|l| l.view())
    }

    // =========================================================================
    // Row selection
    // =========================================================================

    /// Build a new dataset from the samples at `indices`, in the given order.
    ///
    /// The schema is shared; labels follow the selection when present.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds.
    pub fn select_rows(&self, indices: &[usize]) -> Dataset {
        let n_features = self.n_features();
        let mut features = Array2::zeros((n_features, indices.len()));
        for (out, &src) in indices.iter().enumerate() {
            for f in 0..n_features {
                features[[f, out]] = self.features[[f, src]];
            }
        }

        let labels = self
            .labels
            .as_ref()
            .map(|l| indices.iter().map(|&src| l[src]).collect::<Array1<f32>>());

        Dataset {
            features,
            schema: self.schema.clone(),
            labels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{FeatureMeta, FeatureType};
    use ndarray::array;

    fn two_feature_schema() -> DatasetSchema {
        DatasetSchema::from_features(vec![
            FeatureMeta::categorical("workclass"),
            FeatureMeta::numeric("age"),
        ])
    }

    #[test]
    fn dataset_new() {
        // Feature-major [n_features, n_samples]: 2 features, 3 samples
        let features = array![[0.0, 1.0, 0.0], [25.0, 30.0, 35.0]];
        let labels = array![0.0, 1.0, 0.0];
        let ds = Dataset::new(features, two_feature_schema(), Some(labels)).unwrap();

        assert_eq!(ds.n_samples(), 3);
        assert_eq!(ds.n_features(), 2);
        assert!(ds.has_labels());
        assert_eq!(ds.schema().feature_type(0), FeatureType::Categorical);

        // Feature-major layout: each feature contiguous
        assert_eq!(ds.feature(1).to_vec(), vec![25.0, 30.0, 35.0]);
        assert_eq!(ds.sample(1).to_vec(), vec![1.0, 30.0]);
    }

    #[test]
    fn dataset_without_labels() {
        let features = array![[1.0, 2.0], [3.0, 4.0]];
        let ds = Dataset::new(features, two_feature_schema(), None).unwrap();
        assert!(!ds.has_labels());
        assert!(ds.labels().is_none());
    }

    #[test]
    fn empty_features_error() {
        let features = Array2::zeros((0, 3));
        let result = Dataset::new(features, DatasetSchema::default(), None);
        assert!(matches!(result, Err(DatasetError::EmptyFeatures)));
    }

    #[test]
    fn schema_mismatch_error() {
        let features = array![[1.0, 2.0]];
        let result = Dataset::new(features, two_feature_schema(), None);
        assert!(matches!(
            result,
            Err(DatasetError::ShapeMismatch { field: "schema", .. })
        ));
    }

    #[test]
    fn label_mismatch_error() {
        let features = array![[0.0, 1.0], [25.0, 30.0]];
        let labels = array![0.0];
        let result = Dataset::new(features, two_feature_schema(), Some(labels));
        assert!(matches!(
            result,
            Err(DatasetError::ShapeMismatch { field: "labels", .. })
        ));
    }

    #[test]
    fn select_rows_preserves_order_and_labels() {
        let features = array![[0.0, 1.0, 2.0], [10.0, 20.0, 30.0]];
        let labels = array![0.0, 1.0, 0.0];
        let ds = Dataset::new(features, two_feature_schema(), Some(labels)).unwrap();

        let picked = ds.select_rows(&[2, 0]);
        assert_eq!(picked.n_samples(), 2);
        assert_eq!(picked.feature(0).to_vec(), vec![2.0, 0.0]);
        assert_eq!(picked.feature(1).to_vec(), vec![30.0, 10.0]);
        assert_eq!(picked.labels().unwrap().to_vec(), vec![0.0, 0.0]);
    }

    #[test]
    fn select_rows_empty_selection() {
        let features = array![[0.0, 1.0], [10.0, 20.0]];
        let ds = Dataset::new(features, two_feature_schema(), None).unwrap();
        let picked = ds.select_rows(&[]);
        assert_eq!(picked.n_samples(), 0);
        assert_eq!(picked.n_features(), 2);
    }

    // Verify Send + Sync
    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn dataset_is_send_sync() {
        assert_send_sync::<Dataset>();
    }
}
