//! Feature-vector assembly.

use ndarray::{Array1, Array2};

use crate::data::{ColumnType, DataTable, Dataset, DatasetError, DatasetSchema, FeatureMeta};

use super::indexer::{IndexerError, StringIndexer};

/// Errors produced while assembling a [`Dataset`] from a table.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssembleError {
    /// A referenced column does not exist in the table.
    #[error("column {0:?} not found")]
    MissingColumn(String),

    /// Indexer count does not match the categorical column count.
    #[error("got {got} indexers for {expected} categorical columns")]
    IndexerCount { expected: usize, got: usize },

    /// An indexer was fit on a different column than the one it is paired
    /// with.
    #[error("expected an indexer for column {expected:?}, got one for {got:?}")]
    IndexerMismatch { expected: String, got: String },

    /// A column listed as numerical is not numeric.
    #[error("column {column:?} is not numeric")]
    TypeMismatch { column: String },

    /// A missing field reached assembly; clean the table first.
    #[error("column {column:?} has a missing value at row {row}")]
    MissingValue { column: String, row: usize },

    #[error(transparent)]
    Indexer(#[from] IndexerError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// Concatenates indexed categorical columns and raw numerical columns into
/// one feature vector per row.
///
/// The feature order is fixed: the categorical columns in the order given,
/// then the numerical columns in the order given. For the same column set the
/// order is deterministic and reproducible between runs.
#[derive(Debug, Clone)]
pub struct FeatureAssembler {
    categorical: Vec<String>,
    numerical: Vec<String>,
}

impl FeatureAssembler {
    /// Create an assembler over the given column names.
    pub fn new(categorical: Vec<String>, numerical: Vec<String>) -> Self {
        Self {
            categorical,
            numerical,
        }
    }

    /// Total number of features produced.
    pub fn n_features(&self) -> usize {
        self.categorical.len() + self.numerical.len()
    }

    /// Feature names in output order: categorical columns, then numerical.
    pub fn feature_names(&self) -> Vec<&str> {
        self.categorical
            .iter()
            .chain(self.numerical.iter())
            .map(String::as_str)
            .collect()
    }

    /// Assemble the feature matrix and indexed labels into a [`Dataset`].
    ///
    /// `indexers[i]` must be fit on `categorical[i]`; `label_indexer`
    /// determines the label column and its class indices. The table must be
    /// cleaned first - any missing field is an error.
    pub fn assemble(
        &self,
        table: &DataTable,
        indexers: &[StringIndexer],
        label_indexer: &StringIndexer,
    ) -> Result<Dataset, AssembleError> {
        if indexers.len() != self.categorical.len() {
            return Err(AssembleError::IndexerCount {
                expected: self.categorical.len(),
                got: indexers.len(),
            });
        }

        let n_rows = table.n_rows();
        let mut features = Array2::zeros((self.n_features(), n_rows));
        let mut metas = Vec::with_capacity(self.n_features());

        // Indexed categorical features first, in the configured order.
        for (i, (name, indexer)) in self.categorical.iter().zip(indexers).enumerate() {
            if indexer.column() != name {
                return Err(AssembleError::IndexerMismatch {
                    expected: name.clone(),
                    got: indexer.column().to_string(),
                });
            }
            let column = table
                .column(name)
                .ok_or_else(|| AssembleError::MissingColumn(name.clone()))?;
            let encoded = indexer.transform_column(column)?;
            features
                .row_mut(i)
                .assign(&Array1::from_vec(encoded));
            metas.push(FeatureMeta::categorical(name.clone()));
        }

        // Raw numerical features after, in the configured order.
        for (i, name) in self.numerical.iter().enumerate() {
            let column = table
                .column(name)
                .ok_or_else(|| AssembleError::MissingColumn(name.clone()))?;
            if column.column_type() != ColumnType::Num {
                return Err(AssembleError::TypeMismatch {
                    column: name.clone(),
                });
            }
            let row_idx = self.categorical.len() + i;
            for row in 0..n_rows {
                let value =
                    column
                        .numeric_value(row)
                        .ok_or_else(|| AssembleError::MissingValue {
                            column: name.clone(),
                            row,
                        })?;
                features[[row_idx, row]] = value as f32;
            }
            metas.push(FeatureMeta::numeric(name.clone()));
        }

        // Indexed label.
        let label_column = table
            .column(label_indexer.column())
            .ok_or_else(|| AssembleError::MissingColumn(label_indexer.column().to_string()))?;
        let labels = Array1::from_vec(label_indexer.transform_column(label_column)?);

        let schema = DatasetSchema::from_features(metas);
        Ok(Dataset::new(features, schema, Some(labels))?)
    }
}
