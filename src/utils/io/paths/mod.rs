//! Path utilities for file and directory operations

pub mod general;

pub use general::find_files_with_extension;
