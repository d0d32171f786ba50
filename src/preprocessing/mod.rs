//! Data preprocessing module
//!
//! The stages that turn a raw loan table into a model-ready matrix:
//! - Missing-value removal (rows with any gap are dropped, never imputed)
//! - Label encoding of string columns
//! - Header normalization
//! - Standard scaling of the feature matrix

mod cleaning;
mod encoder;
mod scaler;

pub use cleaning::{
    complete_row_mask, count_incomplete_rows, drop_missing, normalize_column_name,
    normalize_headers,
};
pub use encoder::{encode_categorical_columns, EncodedColumn, LabelEncoder};
pub use scaler::StandardScaler;
