//! Utility functions for error handling
//!
//! File-system helpers that attach the path and the purpose of an access to the
//! error, so a failed load reports which input was load-bearing.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::error::{Error, Result};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(Error::io_at(
            path,
            format!("File not found, needed for {purpose}"),
            io::Error::from(io::ErrorKind::NotFound),
        ));
    }

    if !path.is_file() {
        return Err(Error::io_at(
            path,
            format!("Expected a file for {purpose}"),
            io::Error::new(io::ErrorKind::InvalidInput, "path is not a file"),
        ));
    }

    fs::File::open(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => "Permission denied - check file permissions".to_string(),
            _ => format!("Failed to open file for {purpose}"),
        };
        Error::io_at(path, context, e)
    })
}

/// Check if a directory exists and is readable, with rich error information
pub fn validate_directory(path: &Path, purpose: &str) -> Result<()> {
    if !path.exists() {
        return Err(Error::io_at(
            path,
            format!("Directory not found, needed for {purpose}"),
            io::Error::from(io::ErrorKind::NotFound),
        ));
    }

    if !path.is_dir() {
        return Err(Error::io_at(
            path,
            format!("Expected a directory for {purpose}"),
            io::Error::new(io::ErrorKind::InvalidInput, "path is not a directory"),
        ));
    }

    fs::read_dir(path)
        .map(|_| ())
        .map_err(|e| Error::io_at(path, format!("Failed to access directory for {purpose}"), e))
}

/// Safely read a file to string with rich error information
///
/// The file handle is dropped before returning, whether or not the read succeeded.
pub fn safe_read_to_string(path: &Path, purpose: &str) -> Result<String> {
    let mut file = safe_open_file(path, purpose)?;

    let mut content = String::new();
    match file.read_to_string(&mut content) {
        Ok(_) => Ok(content),
        Err(e) => {
            let context = match e.kind() {
                io::ErrorKind::InvalidData => {
                    "File contains invalid UTF-8 data - cannot read as text".to_string()
                }
                _ => format!("Failed to read file content for {purpose}"),
            };
            Err(Error::io_at(path, context, e))
        }
    }
}
