//! Utility modules

pub mod data_loader;

pub use data_loader::{columns_to_array2, column_to_vec, DataLoader, MISSING_TOKENS};
