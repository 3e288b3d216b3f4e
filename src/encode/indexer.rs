//! Frequency-descending value indexing for one column.

use std::collections::HashMap;

use crate::data::Column;

/// Errors produced while fitting or applying a [`StringIndexer`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IndexerError {
    /// The column had no observed (non-missing) values to fit on.
    #[error("column {0:?} has no observed values")]
    EmptyColumn(String),

    /// A missing field reached the indexer; clean the table first.
    #[error("column {column:?} has a missing value at row {row}")]
    MissingValue { column: String, row: usize },

    /// A value not seen during fit was passed to `transform`.
    #[error("value {value:?} of column {column:?} was not seen during fit")]
    UnseenValue { column: String, value: String },
}

/// A fitted mapping from distinct column values to integer indices.
///
/// Indices are assigned by descending observation count; equal counts are
/// ordered by ascending value, so the mapping is deterministic for a given
/// column. The mapping is a bijection over the distinct values observed
/// during fit: [`label_for`](Self::label_for) inverts
/// [`transform_value`](Self::transform_value).
#[derive(Debug, Clone)]
pub struct StringIndexer {
    column: String,
    /// Value at position `i` carries index `i`.
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl StringIndexer {
    /// Fit an indexer on one column's non-missing values.
    ///
    /// Numeric columns are indexed through their canonical display form,
    /// which only matters when the label column is numeric.
    ///
    /// # Errors
    ///
    /// [`IndexerError::EmptyColumn`] if the column has no observed values.
    pub fn fit(column: &Column) -> Result<Self, IndexerError> {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for row in 0..column.len() {
            if let Some(value) = column.display_value(row) {
                *counts.entry(value).or_insert(0) += 1;
            }
        }
        if counts.is_empty() {
            return Err(IndexerError::EmptyColumn(column.name().to_string()));
        }

        let mut ordered: Vec<(String, u64)> = counts.into_iter().collect();
        // Descending count, ascending value on ties.
        ordered.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let labels: Vec<String> = ordered.into_iter().map(|(value, _)| value).collect();
        let index = labels
            .iter()
            .enumerate()
            .map(|(i, value)| (value.clone(), i))
            .collect();

        Ok(Self {
            column: column.name().to_string(),
            labels,
            index,
        })
    }

    /// Name of the column this indexer was fit on.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Number of distinct values observed during fit.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True if no values were observed (never true for a fitted indexer).
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Map a value to its index.
    pub fn transform_value(&self, value: &str) -> Result<usize, IndexerError> {
        self.index
            .get(value)
            .copied()
            .ok_or_else(|| IndexerError::UnseenValue {
                column: self.column.clone(),
                value: value.to_string(),
            })
    }

    /// Map an entire column to indices, in row order.
    ///
    /// # Errors
    ///
    /// [`IndexerError::MissingValue`] on any missing field,
    /// [`IndexerError::UnseenValue`] on values absent from the fit.
    pub fn transform_column(&self, column: &Column) -> Result<Vec<f32>, IndexerError> {
        (0..column.len())
            .map(|row| {
                let value =
                    column
                        .display_value(row)
                        .ok_or_else(|| IndexerError::MissingValue {
                            column: column.name().to_string(),
                            row,
                        })?;
                Ok(self.transform_value(&value)? as f32)
            })
            .collect()
    }

    /// The value carrying `index`, the inverse of
    /// [`transform_value`](Self::transform_value).
    pub fn label_for(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// All observed values in index order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ColumnValues;

    fn str_column(name: &str, values: &[&str]) -> Column {
        Column::new(
            name,
            ColumnValues::Str(values.iter().map(|v| Some(v.to_string())).collect()),
        )
    }

    #[test]
    fn most_frequent_value_gets_index_zero() {
        let col = str_column("workclass", &["Private", "Gov", "Private", "Private", "Gov"]);
        let indexer = StringIndexer::fit(&col).unwrap();
        assert_eq!(indexer.transform_value("Private").unwrap(), 0);
        assert_eq!(indexer.transform_value("Gov").unwrap(), 1);
        assert_eq!(indexer.len(), 2);
    }

    #[test]
    fn ties_break_lexicographically() {
        let col = str_column("c", &["b", "a", "c", "a", "b", "c"]);
        let indexer = StringIndexer::fit(&col).unwrap();
        // All counts equal: ascending value order.
        assert_eq!(indexer.transform_value("a").unwrap(), 0);
        assert_eq!(indexer.transform_value("b").unwrap(), 1);
        assert_eq!(indexer.transform_value("c").unwrap(), 2);
    }

    #[test]
    fn fit_is_deterministic() {
        let col = str_column("c", &["x", "y", "x", "z", "z", "y", "x"]);
        let a = StringIndexer::fit(&col).unwrap();
        let b = StringIndexer::fit(&col).unwrap();
        assert_eq!(a.labels(), b.labels());
    }

    #[test]
    fn transform_and_label_for_are_inverse() {
        let col = str_column("c", &["red", "green", "red", "blue"]);
        let indexer = StringIndexer::fit(&col).unwrap();
        for value in ["red", "green", "blue"] {
            let idx = indexer.transform_value(value).unwrap();
            assert_eq!(indexer.label_for(idx), Some(value));
        }
        // Indices form 0..n_distinct
        let mut indices: Vec<usize> = indexer
            .labels()
            .iter()
            .map(|v| indexer.transform_value(v).unwrap())
            .collect();
        indices.sort_unstable();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn unseen_value_errors() {
        let col = str_column("c", &["a", "b"]);
        let indexer = StringIndexer::fit(&col).unwrap();
        assert!(matches!(
            indexer.transform_value("z"),
            Err(IndexerError::UnseenValue { .. })
        ));
    }

    #[test]
    fn missing_value_errors_in_transform() {
        let fit_col = str_column("c", &["a", "b"]);
        let indexer = StringIndexer::fit(&fit_col).unwrap();
        let holed = Column::new(
            "c",
            ColumnValues::Str(vec![Some("a".to_string()), None]),
        );
        assert!(matches!(
            indexer.transform_column(&holed),
            Err(IndexerError::MissingValue { row: 1, .. })
        ));
    }

    #[test]
    fn empty_column_errors() {
        let col = Column::new("c", ColumnValues::Str(vec![None, None]));
        assert!(matches!(
            StringIndexer::fit(&col),
            Err(IndexerError::EmptyColumn(_))
        ));
    }

    #[test]
    fn numeric_label_column_is_indexed_by_display_form() {
        let col = Column::new(
            "target",
            ColumnValues::Num(vec![Some(1.0), Some(0.0), Some(1.0)]),
        );
        let indexer = StringIndexer::fit(&col).unwrap();
        assert_eq!(indexer.transform_value("1").unwrap(), 0);
        assert_eq!(indexer.transform_value("0").unwrap(), 1);
    }

    #[test]
    fn transform_column_preserves_row_order() {
        let col = str_column("c", &["b", "a", "b", "b"]);
        let indexer = StringIndexer::fit(&col).unwrap();
        let encoded = indexer.transform_column(&col).unwrap();
        assert_eq!(encoded, vec![0.0, 1.0, 0.0, 0.0]);
    }
}
