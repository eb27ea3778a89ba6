//! Shared utilities for table IO, Arrow column access and logging

pub mod arrow;
pub mod io;
pub mod logging;

pub use io::{TableFormat, find_files_with_extension, read_table, write_table};
