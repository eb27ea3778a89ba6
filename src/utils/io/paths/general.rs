//! General path utilities for snapshot directories

use std::path::{Path, PathBuf};

use itertools::Itertools;

use crate::error::util::validate_directory;
use crate::error::{Error, Result};
use crate::utils::logging::{log_operation_complete, log_operation_start, log_warning};

/// Find all files with the given extension directly inside `dir`
///
/// The result is sorted lexicographically by file name so loads are deterministic.
/// The extension is compared case-insensitively and without a leading dot.
pub fn find_files_with_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    log_operation_start("Searching for snapshot files in", dir);
    validate_directory(dir, "snapshot discovery")?;

    let wanted = extension.trim_start_matches('.').to_ascii_lowercase();
    let entries = std::fs::read_dir(dir)
        .map_err(|e| Error::io_at(dir, "Failed to read snapshot directory", e))?;

    let files = entries
        .map(|entry| {
            entry
                .map(|e| e.path())
                .map_err(|e| Error::io_at(dir, "Failed to read directory entry", e))
        })
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(&wanted))
        })
        .sorted_by(|a, b| a.file_name().cmp(&b.file_name()))
        .collect_vec();

    if files.is_empty() {
        log_warning(&format!("No .{wanted} files found in directory"), Some(dir));
    } else {
        log_operation_complete("found", dir, files.len(), None);
    }

    Ok(files)
}
