//! Integration tests for data preparation: loading, cleaning, encoding, headers and scaling

use credit_scoring::error::ScoringError;
use credit_scoring::preprocessing::{
    count_incomplete_rows, drop_missing, encode_categorical_columns, normalize_headers,
    StandardScaler,
};
use credit_scoring::utils::{columns_to_array2, DataLoader};
use ndarray::Axis;
use polars::prelude::*;
use std::collections::BTreeSet;
use std::io::Write;

fn frame_with_gaps() -> DataFrame {
    df!(
        "age" => &[Some(25.0), Some(31.0), None, Some(47.0), Some(52.0)],
        "region" => &[Some("North"), None, Some("South"), Some("South"), Some("East")],
        "status" => &[0i64, 1, 0, 1, 0]
    )
    .unwrap()
}

// ============================================================================
// Cleaning
// ============================================================================

#[test]
fn test_drop_missing_removes_incomplete_rows() {
    let df = frame_with_gaps();
    assert_eq!(count_incomplete_rows(&df).unwrap(), 2);

    let cleaned = drop_missing(&df).unwrap();
    assert_eq!(cleaned.height(), 3);
    for column in cleaned.get_columns() {
        assert_eq!(column.null_count(), 0);
    }
}

#[test]
fn test_drop_missing_is_idempotent() {
    let once = drop_missing(&frame_with_gaps()).unwrap();
    let twice = drop_missing(&once).unwrap();
    assert!(once.equals(&twice));
}

#[test]
fn test_drop_missing_treats_nan_as_missing() {
    let df = df!("x" => &[1.0, f64::NAN, 3.0], "y" => &[1i64, 2, 3]).unwrap();
    assert_eq!(drop_missing(&df).unwrap().height(), 2);
}

#[test]
fn test_csv_blank_fields_are_dropped() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "age,income,status").unwrap();
    writeln!(file, "30,4000,0").unwrap();
    writeln!(file, "41,,1").unwrap();
    writeln!(file, "52,6100,1").unwrap();
    file.flush().unwrap();

    let df = DataLoader::new().load_csv(file.path()).unwrap();
    assert_eq!(df.height(), 3);
    assert_eq!(drop_missing(&df).unwrap().height(), 2);
}

#[test]
fn test_csv_missing_tokens_are_dropped() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "age,income,region,status").unwrap();
    writeln!(file, "30,4000,North,0").unwrap();
    writeln!(file, "41,NA,South,1").unwrap();
    writeln!(file, "52,6100,None,1").unwrap();
    writeln!(file, "38,N/A,East,0").unwrap();
    writeln!(file, "27,5200,NULL,1").unwrap();
    writeln!(file, "45,4800,West,0").unwrap();
    file.flush().unwrap();

    let df = DataLoader::new().load_csv(file.path()).unwrap();
    assert_eq!(df.height(), 6);
    assert_eq!(df.column("income").unwrap().dtype(), &DataType::Int64);
    assert_eq!(count_incomplete_rows(&df).unwrap(), 4);

    let mut cleaned = drop_missing(&df).unwrap();
    assert_eq!(cleaned.height(), 2);
    let encoded = encode_categorical_columns(&mut cleaned).unwrap();
    assert_eq!(encoded.len(), 1);
    assert_eq!(encoded[0].name, "region");
}

#[test]
fn test_csv_types_inferred_from_every_row() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "income,status").unwrap();
    for i in 0..1200 {
        if i == 1100 {
            writeln!(file, "1500.5,{}", i % 2).unwrap();
        } else {
            writeln!(file, "{},{}", 1000 + i, i % 2).unwrap();
        }
    }
    file.flush().unwrap();

    let df = DataLoader::new().load_csv(file.path()).unwrap();
    assert_eq!(df.height(), 1200);
    assert_eq!(df.column("income").unwrap().dtype(), &DataType::Float64);

    let x = columns_to_array2(&df, &["income".to_string()]).unwrap();
    assert_eq!(x[[1100, 0]], 1500.5);
    assert_eq!(x[[1099, 0]], 2099.0);
}

#[test]
fn test_unreadable_file_is_parse_error() {
    let err = DataLoader::new()
        .load_csv(std::path::Path::new("/nonexistent/loans.csv"))
        .unwrap_err();
    assert!(matches!(err, ScoringError::ParseError(_)));
}

// ============================================================================
// Encoding
// ============================================================================

#[test]
fn test_encoding_maps_k_values_to_range() {
    let mut df = df!(
        "loan_type" => &["type1", "type2", "type3", "type1", "type2", "type3", "type1"],
        "amount" => &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]
    )
    .unwrap();

    let encoded = encode_categorical_columns(&mut df).unwrap();
    assert_eq!(encoded.len(), 1);
    assert_eq!(encoded[0].n_classes, 3);

    let codes: BTreeSet<i64> = df
        .column("loan_type")
        .unwrap()
        .as_materialized_series()
        .i64()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(codes, BTreeSet::from([0, 1, 2]));
}

#[test]
fn test_encoding_skips_numeric_frames() {
    let mut df = df!("a" => &[1.0, 2.0], "b" => &[3i64, 4]).unwrap();
    assert!(encode_categorical_columns(&mut df).unwrap().is_empty());
}

// ============================================================================
// Headers
// ============================================================================

#[test]
fn test_normalize_headers() {
    let mut df = df!(
        " Loan Amount " => &[1.0],
        "Credit_Worthiness" => &[2.0],
        "Status" => &[0i64]
    )
    .unwrap();

    let names = normalize_headers(&mut df).unwrap();
    assert_eq!(names, vec!["loan_amount", "credit_worthiness", "status"]);
    assert!(df.column("loan_amount").is_ok());
}

#[test]
fn test_normalize_headers_collision() {
    let mut df = df!("Status" => &[0i64], "status" => &[1i64]).unwrap();
    assert!(matches!(normalize_headers(&mut df), Err(ScoringError::DataError(_))));
}

// ============================================================================
// Scaling
// ============================================================================

#[test]
fn test_scaled_columns_have_zero_mean_unit_std() {
    let df = df!(
        "income" => &[1200.0, 5400.0, 3300.0, 9100.0, 2500.0, 7000.0],
        "term" => &[360.0, 360.0, 360.0, 360.0, 360.0, 360.0],
        "age" => &[25.0, 37.0, 45.0, 52.0, 61.0, 29.0]
    )
    .unwrap();
    let names = vec!["income".to_string(), "term".to_string(), "age".to_string()];
    let x = columns_to_array2(&df, &names).unwrap();

    let scaled = StandardScaler::new().fit_transform(&x).unwrap();

    for (j, col) in scaled.axis_iter(Axis(1)).enumerate() {
        assert!(col.mean().unwrap().abs() < 1e-10);
        let std = col.std(0.0);
        if j == 1 {
            assert_eq!(std, 0.0, "constant column should stay flat");
        } else {
            assert!((std - 1.0).abs() < 1e-10);
        }
    }
}
