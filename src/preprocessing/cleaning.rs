//! Missing-value removal and header normalization

use crate::error::{Result, ScoringError};
use polars::prelude::*;
use std::collections::HashSet;

/// Boolean mask that is `true` for rows with no missing field.
///
/// A field is missing when it is null, a float NaN, or an empty string.
pub fn complete_row_mask(df: &DataFrame) -> Result<BooleanChunked> {
    let mut mask = BooleanChunked::full("complete".into(), true, df.height());

    for column in df.get_columns() {
        let series = column.as_materialized_series();
        let mut present = series.is_not_null();

        if series.dtype().is_float() {
            present = &present & &series.is_not_nan()?;
        } else if let Ok(ca) = series.str() {
            let non_empty: BooleanChunked = ca
                .into_iter()
                .map(|v| v.map_or(false, |s| !s.is_empty()))
                .collect();
            present = &present & &non_empty;
        }

        mask = &mask & &present;
    }

    Ok(mask)
}

/// Number of rows that contain at least one missing field
pub fn count_incomplete_rows(df: &DataFrame) -> Result<usize> {
    let mask = complete_row_mask(df)?;
    Ok(mask.into_iter().filter(|v| *v != Some(true)).count())
}

/// Drop every row that contains a missing field. No imputation is done.
pub fn drop_missing(df: &DataFrame) -> Result<DataFrame> {
    let mask = complete_row_mask(df)?;
    Ok(df.filter(&mask)?)
}

/// Trim, lower-case and replace spaces with underscores
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Normalize every column name in place and return the new names.
///
/// Two headers that normalize to the same name are a data error.
pub fn normalize_headers(df: &mut DataFrame) -> Result<Vec<String>> {
    let old_names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect();
    let new_names: Vec<String> = old_names.iter().map(|n| normalize_column_name(n)).collect();

    let mut seen = HashSet::with_capacity(new_names.len());
    for name in &new_names {
        if !seen.insert(name.as_str()) {
            return Err(ScoringError::DataError(format!(
                "duplicate column name '{}' after header normalization",
                name
            )));
        }
    }

    for (old, new) in old_names.iter().zip(new_names.iter()) {
        if old != new {
            df.rename(old, new.as_str().into())?;
        }
    }

    Ok(new_names)
}
