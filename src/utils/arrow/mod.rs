//! Arrow data handling utilities
//!
//! Helpers for pulling typed columns out of record batches read from the tabular
//! inputs.

pub mod array_utils;
pub mod extractors;

pub use array_utils::{downcast_array, get_column};
pub use extractors::{extract_booleans, extract_int64s, extract_strings};
