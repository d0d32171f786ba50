//! Data loading utilities

use crate::error::{Result, ScoringError};
use polars::prelude::*;
use std::path::Path;

/// Field values read as missing, matching the usual spreadsheet and
/// dataframe export conventions.
pub const MISSING_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// CSV loader for the scoring pipeline
pub struct DataLoader {
    /// Rows scanned to infer column types, `None` scans the whole file
    infer_schema_length: Option<usize>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    /// Create a loader that infers column types from every row
    pub fn new() -> Self {
        Self {
            infer_schema_length: None,
        }
    }

    /// Set the number of rows used for schema inference (`None` scans the whole file)
    pub fn with_infer_schema_length(mut self, rows: Option<usize>) -> Self {
        self.infer_schema_length = rows;
        self
    }

    /// Load a CSV file with a header row.
    ///
    /// Fields equal to one of [`MISSING_TOKENS`] load as null. Any failure
    /// to open or parse the file is reported as [`ScoringError::ParseError`].
    pub fn load_csv(&self, path: &Path) -> Result<DataFrame> {
        if !path.is_file() {
            return Err(ScoringError::ParseError(format!(
                "{}: file not found",
                path.display()
            )));
        }

        let null_values = NullValues::AllColumns(
            MISSING_TOKENS
                .iter()
                .map(|&token| PlSmallStr::from_static(token))
                .collect(),
        );
        let parse_opts = CsvParseOptions::default().with_null_values(Some(null_values));

        CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(self.infer_schema_length)
            .with_parse_options(parse_opts)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .and_then(|reader| reader.finish())
            .map_err(|e| ScoringError::ParseError(format!("{}: {}", path.display(), e)))
    }
}

/// Extract named columns from a DataFrame into a row-major `Array2<f64>`.
///
/// Columns are cast to Float64; a null that survives the cast is a data error.
pub fn columns_to_array2(df: &DataFrame, col_names: &[String]) -> Result<ndarray::Array2<f64>> {
    let n_rows = df.height();
    let n_cols = col_names.len();

    let col_data: Vec<Vec<f64>> = col_names
        .iter()
        .map(|name| column_to_vec(df, name))
        .collect::<Result<Vec<_>>>()?;

    let col_refs: Vec<&[f64]> = col_data.iter().map(|c| c.as_slice()).collect();
    Ok(ndarray::Array2::from_shape_fn((n_rows, n_cols), |(r, c)| col_refs[c][r]))
}

/// Extract a single column as `Vec<f64>`
pub fn column_to_vec(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let column = df
        .column(name)
        .map_err(|_| ScoringError::DataError(format!("column '{}' not found", name)))?;
    let series = column
        .as_materialized_series()
        .cast(&DataType::Float64)
        .map_err(|e| ScoringError::DataError(format!("column '{}': {}", name, e)))?;

    series
        .f64()?
        .into_iter()
        .map(|v| {
            v.ok_or_else(|| {
                ScoringError::DataError(format!("column '{}' contains a missing value", name))
            })
        })
        .collect()
}
