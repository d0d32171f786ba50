//! Label encoding for string columns

use crate::error::Result;
use polars::prelude::*;
use std::collections::BTreeSet;
use tracing::debug;

/// Column-local label encoder.
///
/// Codes follow the sorted order of the distinct values seen during `fit`,
/// so a column with `k` distinct values maps onto `0..k`. The encoder lives
/// only for one pass over one column; values it has not seen get no code.
#[derive(Debug, Clone, Default)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Learn the sorted set of distinct values
    pub fn fit<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let distinct: BTreeSet<&str> = values.into_iter().collect();
        Self {
            classes: distinct.into_iter().map(str::to_string).collect(),
        }
    }

    /// Code for a value, if it was seen during `fit`
    pub fn transform(&self, value: &str) -> Option<usize> {
        self.classes
            .binary_search_by(|class| class.as_str().cmp(value))
            .ok()
    }

    /// Distinct values in code order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of distinct values
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }
}

/// Summary of one encoded column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedColumn {
    pub name: String,
    pub n_classes: usize,
}

/// Replace every string column with its integer label codes (Int64).
///
/// Fit and apply happen together; nothing is kept for later datasets.
pub fn encode_categorical_columns(df: &mut DataFrame) -> Result<Vec<EncodedColumn>> {
    let categorical: Vec<String> = df
        .get_columns()
        .iter()
        .filter(|c| c.dtype() == &DataType::String)
        .map(|c| c.name().to_string())
        .collect();

    let mut encoded = Vec::with_capacity(categorical.len());

    for name in &categorical {
        let series = df.column(name)?.as_materialized_series().clone();
        let ca = series.str()?;

        let encoder = LabelEncoder::fit(ca.into_iter().flatten());
        let codes: Vec<Option<i64>> = ca
            .into_iter()
            .map(|v| v.and_then(|s| encoder.transform(s)).map(|code| code as i64))
            .collect();

        df.with_column(Series::new(name.as_str().into(), codes))?;

        debug!(column = %name, n_classes = encoder.n_classes(), "label encoded column");
        encoded.push(EncodedColumn {
            name: name.clone(),
            n_classes: encoder.n_classes(),
        });
    }

    Ok(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_encoder_sorted_codes() {
        let encoder = LabelEncoder::fit(["pr", "ir", "sub", "ir"]);
        assert_eq!(encoder.classes(), &["ir", "pr", "sub"]);
        assert_eq!(encoder.transform("ir"), Some(0));
        assert_eq!(encoder.transform("sub"), Some(2));
        assert_eq!(encoder.transform("unseen"), None);
    }

    #[test]
    fn test_encode_categorical_columns() {
        let mut df = df!(
            "gender" => &["Male", "Female", "Joint", "Male", "Female"],
            "amount" => &[1.0, 2.0, 3.0, 4.0, 5.0]
        )
        .unwrap();

        let encoded = encode_categorical_columns(&mut df).unwrap();
        assert_eq!(
            encoded,
            vec![EncodedColumn { name: "gender".to_string(), n_classes: 3 }]
        );

        let codes: Vec<i64> = df
            .column("gender")
            .unwrap()
            .as_materialized_series()
            .i64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(codes, vec![2, 0, 1, 2, 0]);

        // Numeric columns are left untouched
        assert_eq!(df.column("amount").unwrap().dtype(), &DataType::Float64);
    }

    #[test]
    fn test_encoding_is_column_local() {
        let mut df = df!(
            "first" => &["A", "B"],
            "second" => &["Z", "A"]
        )
        .unwrap();

        encode_categorical_columns(&mut df).unwrap();

        let second: Vec<i64> = df
            .column("second")
            .unwrap()
            .as_materialized_series()
            .i64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        // codes come from this column's own values only
        assert_eq!(second, vec![1, 0]);
    }
}
