//! Raw tabular data loaded from delimited text.
//!
//! [`DataTable`] parses a CSV file with a header row into typed columns.
//! Column types are inferred from content: a column where every non-missing
//! field parses as a number is [`ColumnType::Num`], otherwise
//! [`ColumnType::Str`]. An empty field or a literal `?` (after trimming) is
//! missing.

use std::fmt;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Errors arising while loading or querying a table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// Input file could not be opened.
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Malformed delimited input (ragged rows, invalid UTF-8, I/O failure).
    #[error("failed to parse input: {0}")]
    Csv(#[from] csv::Error),

    /// Columns passed to [`DataTable::from_columns`] differ in length.
    #[error("column {name:?} has {got} rows, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    /// A requested column does not exist.
    #[error("column {0:?} not found")]
    MissingColumn(String),
}

/// Inferred column type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnType {
    /// Textual column.
    Str,
    /// Numeric column (every non-missing field parses as `f64`).
    Num,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Str => write!(f, "string"),
            ColumnType::Num => write!(f, "numeric"),
        }
    }
}

/// Typed column storage. `None` marks a missing field.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnValues {
    Str(Vec<Option<String>>),
    Num(Vec<Option<f64>>),
}

impl ColumnValues {
    fn len(&self) -> usize {
        match self {
            ColumnValues::Str(v) => v.len(),
            ColumnValues::Num(v) => v.len(),
        }
    }
}

/// A single named column.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    name: String,
    values: ColumnValues,
}

impl Column {
    /// Create a column from typed values.
    pub fn new(name: impl Into<String>, values: ColumnValues) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inferred type.
    pub fn column_type(&self) -> ColumnType {
        match self.values {
            ColumnValues::Str(_) => ColumnType::Str,
            ColumnValues::Num(_) => ColumnType::Num,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if the field at `row` is missing.
    pub fn is_missing(&self, row: usize) -> bool {
        match &self.values {
            ColumnValues::Str(v) => v.get(row).map_or(true, |x| x.is_none()),
            ColumnValues::Num(v) => v.get(row).map_or(true, |x| x.is_none()),
        }
    }

    /// Canonical string form of the field at `row`, `None` if missing.
    ///
    /// Numeric fields use the `f64` display form, so `39.0` renders as `39`.
    pub fn display_value(&self, row: usize) -> Option<String> {
        match &self.values {
            ColumnValues::Str(v) => v.get(row)?.clone(),
            ColumnValues::Num(v) => v.get(row)?.map(|x| x.to_string()),
        }
    }

    /// Numeric value of the field at `row`; `None` for string columns or
    /// missing fields.
    pub fn numeric_value(&self, row: usize) -> Option<f64> {
        match &self.values {
            ColumnValues::Str(_) => None,
            ColumnValues::Num(v) => *v.get(row)?,
        }
    }

    fn filter_rows(&self, keep: &[usize]) -> Column {
        let values = match &self.values {
            ColumnValues::Str(v) => {
                ColumnValues::Str(keep.iter().map(|&r| v[r].clone()).collect())
            }
            ColumnValues::Num(v) => ColumnValues::Num(keep.iter().map(|&r| v[r]).collect()),
        };
        Column {
            name: self.name.clone(),
            values,
        }
    }
}

/// Column names partitioned by feature role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnPartition {
    /// String-typed non-label columns, in table order.
    pub categorical: Vec<String>,
    /// Numeric non-label columns, in table order.
    pub numerical: Vec<String>,
}

/// An in-memory table of typed columns sharing one row count.
#[derive(Clone, Debug)]
pub struct DataTable {
    columns: Vec<Column>,
    n_rows: usize,
}

/// True if a raw field is missing: empty or a literal `?`.
fn is_missing_field(field: &str) -> bool {
    let trimmed = field.trim();
    trimmed.is_empty() || trimmed == "?"
}

impl DataTable {
    /// Load a table from a CSV file with a header row.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TableError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Load a table from any reader yielding CSV with a header row.
    ///
    /// Fields are trimmed; per-column types are inferred after all rows are
    /// read.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, TableError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(String::from).collect();
        let records: Vec<csv::StringRecord> = rdr.records().collect::<Result<_, _>>()?;
        let n_rows = records.len();

        let columns = headers
            .iter()
            .enumerate()
            .map(|(c, name)| {
                let raw: Vec<Option<&str>> = records
                    .iter()
                    .map(|rec| rec.get(c).filter(|f| !is_missing_field(f)))
                    .collect();

                // Numeric iff every present field parses; all-missing columns
                // stay textual (no evidence either way).
                let parsed: Option<Vec<Option<f64>>> = {
                    let mut any_present = false;
                    let mut out = Vec::with_capacity(raw.len());
                    let mut ok = true;
                    for field in &raw {
                        match field {
                            Some(f) => match f.parse::<f64>() {
                                Ok(v) => {
                                    any_present = true;
                                    out.push(Some(v));
                                }
                                Err(_) => {
                                    ok = false;
                                    break;
                                }
                            },
                            None => out.push(None),
                        }
                    }
                    (ok && any_present).then_some(out)
                };

                let values = match parsed {
                    Some(nums) => ColumnValues::Num(nums),
                    None => ColumnValues::Str(
                        raw.into_iter().map(|f| f.map(String::from)).collect(),
                    ),
                };
                Column::new(name.clone(), values)
            })
            .collect();

        Ok(Self { columns, n_rows })
    }

    /// Build a table directly from columns. All columns must agree on length.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self, TableError> {
        let n_rows = columns.first().map(|c| c.len()).unwrap_or(0);
        for col in &columns {
            if col.len() != n_rows {
                return Err(TableError::LengthMismatch {
                    name: col.name().to_string(),
                    expected: n_rows,
                    got: col.len(),
                });
            }
        }
        Ok(Self { columns, n_rows })
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    /// All columns in table order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// True if any field anywhere in the table is missing.
    pub fn has_missing(&self) -> bool {
        (0..self.n_rows).any(|r| self.columns.iter().any(|c| c.is_missing(r)))
    }

    /// Remove every row containing at least one missing field.
    ///
    /// Idempotent: applying to its own output changes nothing.
    pub fn drop_missing(&self) -> DataTable {
        let keep: Vec<usize> = (0..self.n_rows)
            .filter(|&r| !self.columns.iter().any(|c| c.is_missing(r)))
            .collect();

        DataTable {
            columns: self.columns.iter().map(|c| c.filter_rows(&keep)).collect(),
            n_rows: keep.len(),
        }
    }

    /// Partition columns by feature role relative to the label column.
    ///
    /// String-typed non-label columns are categorical features; numeric
    /// non-label columns are numerical features. The label itself is never a
    /// feature, whatever its type. Either side of the partition may be empty.
    pub fn partition_columns(&self, label: &str) -> Result<ColumnPartition, TableError> {
        if self.column(label).is_none() {
            return Err(TableError::MissingColumn(label.to_string()));
        }

        let mut categorical = Vec::new();
        let mut numerical = Vec::new();
        for col in &self.columns {
            if col.name() == label {
                continue;
            }
            match col.column_type() {
                ColumnType::Str => categorical.push(col.name().to_string()),
                ColumnType::Num => numerical.push(col.name().to_string()),
            }
        }

        Ok(ColumnPartition {
            categorical,
            numerical,
        })
    }

    /// One `name: type` line per column.
    pub fn format_schema(&self) -> String {
        let mut out = String::new();
        for col in &self.columns {
            out.push_str(&format!("  {}: {}\n", col.name(), col.column_type()));
        }
        out
    }

    /// The first `n` rows as an aligned text table. Missing fields render as
    /// `null`.
    pub fn format_rows(&self, n: usize) -> String {
        let n = n.min(self.n_rows);
        let cells: Vec<Vec<String>> = (0..n)
            .map(|r| {
                self.columns
                    .iter()
                    .map(|c| c.display_value(r).unwrap_or_else(|| "null".to_string()))
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| {
                cells
                    .iter()
                    .map(|row| row[i].len())
                    .chain([c.name().len()])
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{:<w$}", c.name()))
            .collect();
        out.push_str(&header.join(" | "));
        out.push('\n');
        out.push_str(
            &widths
                .iter()
                .map(|&w| "-".repeat(w))
                .collect::<Vec<_>>()
                .join("-|-"),
        );
        out.push('\n');
        for row in &cells {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(v, &w)| format!("{v:<w$}"))
                .collect();
            out.push_str(&line.join(" | "));
            out.push('\n');
        }
        out
    }
}
