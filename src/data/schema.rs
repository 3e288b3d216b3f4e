//! Feature type definitions.
//!
//! This module defines the schema types that describe dataset structure.

/// Logical feature types.
///
/// Features are stored as `f32` regardless of type. The `FeatureType` records
/// where a feature came from: an indexed categorical column or a raw numeric
/// column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FeatureType {
    /// Continuous numeric feature.
    #[default]
    Numeric,

    /// Indexed categorical feature stored as float.
    ///
    /// Valid values: `0.0, 1.0, 2.0, ..., n_categories-1.0`, assigned by a
    /// [`StringIndexer`](crate::encode::StringIndexer).
    Categorical,
}

impl FeatureType {
    /// Returns true if this is a categorical feature.
    #[inline]
    pub fn is_categorical(&self) -> bool {
        matches!(self, FeatureType::Categorical)
    }

    /// Returns true if this is a numeric feature.
    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, FeatureType::Numeric)
    }
}

/// Metadata for a single feature.
///
/// Every feature originates from a named CSV column, so names are mandatory.
#[derive(Clone, Debug)]
pub struct FeatureMeta {
    /// Feature name (the source column name).
    pub name: String,

    /// Feature type.
    pub feature_type: FeatureType,
}

impl FeatureMeta {
    /// Create metadata for a numeric feature.
    pub fn numeric(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            feature_type: FeatureType::Numeric,
        }
    }

    /// Create metadata for an indexed categorical feature.
    pub fn categorical(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            feature_type: FeatureType::Categorical,
        }
    }
}

/// Schema describing the dataset structure.
#[derive(Clone, Debug, Default)]
pub struct DatasetSchema {
    /// Per-feature metadata, in feature order.
    features: Vec<FeatureMeta>,
}

impl DatasetSchema {
    /// Create a schema with the given feature metadata.
    pub fn from_features(features: Vec<FeatureMeta>) -> Self {
        Self { features }
    }

    /// Number of features in the schema.
    pub fn n_features(&self) -> usize {
        self.features.len()
    }

    /// Get metadata for a feature by index.
    pub fn get(&self, index: usize) -> Option<&FeatureMeta> {
        self.features.get(index)
    }

    /// Get the feature type for a feature by index.
    pub fn feature_type(&self, index: usize) -> FeatureType {
        self.features
            .get(index)
            .map(|m| m.feature_type)
            .unwrap_or(FeatureType::Numeric)
    }

    /// Check if any feature is categorical.
    pub fn has_categorical(&self) -> bool {
        self.features.iter().any(|m| m.feature_type.is_categorical())
    }

    /// Get feature index by name.
    ///
    /// Schemas here are small (one entry per CSV column), so this is a
    /// linear scan.
    pub fn feature_index(&self, name: &str) -> Option<usize> {
        self.features.iter().position(|m| m.name == name)
    }

    /// Get an iterator over feature metadata.
    pub fn iter(&self) -> impl Iterator<Item = &FeatureMeta> {
        self.features.iter()
    }
}
