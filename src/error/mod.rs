//! Error handling for the wait-time pipeline.
//!
//! Parse-level defects (bad wait-time text, corrupt JSON chunks) and identity misses
//! never surface here; they degrade to `None` inside the records. Only load-bearing
//! input defects and I/O failures become an [`Error`].

pub mod util;

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Errors raised while loading inputs or writing the feature table
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Plain I/O error without file context
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// I/O error tied to a specific path
    #[error("{context} ({}): {source}", path.display())]
    PathIo {
        path: PathBuf,
        context: String,
        #[source]
        source: io::Error,
    },

    /// Error building or reading Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error reading or writing Parquet files
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error (de)serializing JSON outside of the tolerant snapshot loader
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error converting typed rows to or from Arrow
    #[error("Serde Arrow error: {0}")]
    SerdeArrow(#[from] serde_arrow::Error),

    /// Worker pool could not be started
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Configuration file could not be parsed
    #[error("Config error: {0}")]
    ConfigFile(#[from] toml::de::Error),

    /// Configuration values are inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A required column is missing from a tabular input
    #[error("Column '{column}' not found in {table}")]
    ColumnNotFound { column: String, table: String },

    /// A row of the hospital mapping table is unusable
    #[error("Malformed hospital mapping row {row}: {reason}")]
    MalformedMapping { row: usize, reason: String },

    /// The same hospital id appears twice in the mapping table
    #[error("Duplicate hospital id in mapping table: {0}")]
    DuplicateHospitalId(String),

    /// The mapping table contained no rows
    #[error("Hospital mapping table is empty: {}", .0.display())]
    EmptyMapping(PathBuf),

    /// A timestamp string did not match any supported layout
    #[error("Invalid timestamp '{value}'")]
    InvalidTimestamp { value: String },

    /// The file extension does not name a supported table format
    #[error("Unsupported table format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

impl Error {
    /// Wrap an I/O error with the path and the reason the path was accessed
    pub fn io_at(path: impl Into<PathBuf>, context: impl Into<String>, source: io::Error) -> Self {
        Self::PathIo {
            path: path.into(),
            context: context.into(),
            source,
        }
    }

    /// Shorthand for a missing column
    pub fn column_not_found(column: &str, table: &str) -> Self {
        Self::ColumnNotFound {
            column: column.to_string(),
            table: table.to_string(),
        }
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;
