//! Historical snapshot loading
//!
//! Snapshot files hold JSON objects written back to back with no separator:
//! `{"timestamp": "...", "data": {"<hospital>": "<wait time>", ...}}{"timestamp": ...}`.
//! Each object is parsed on its own and flattened into one observation per hospital.
//! Unreadable files and malformed objects are skipped and counted.

use std::path::Path;

use rayon::prelude::*;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::error::util::safe_read_to_string;
use crate::models::{DataSource, Observation};
use crate::parse::parse_timestamp;
use crate::utils::io::find_files_with_extension;
use crate::utils::logging::{
    create_main_progress_bar, finish_progress_bar, log_operation_complete, log_operation_start,
    log_skipped, log_warning,
};

/// Expected shape of one snapshot object
#[derive(Debug, Deserialize)]
struct SnapshotPayload {
    timestamp: String,
    data: Map<String, Value>,
}

/// Observations loaded from a snapshot directory and what was skipped on the way
#[derive(Debug, Clone, Default)]
pub struct SnapshotLoad {
    pub observations: Vec<Observation>,
    pub files_read: usize,
    pub files_skipped: usize,
    pub chunks_total: usize,
    pub chunks_skipped: usize,
}

/// Outcome of one file
#[derive(Debug, Default)]
struct FileLoad {
    observations: Vec<Observation>,
    chunks_total: usize,
    chunks_skipped: usize,
}

/// Loader for a directory of concatenated-JSON snapshot files
#[derive(Debug, Clone)]
pub struct HistoricalSeriesLoader {
    source: DataSource,
    extension: String,
    show_progress: bool,
}

impl HistoricalSeriesLoader {
    /// Loader for `source` reading `.json` files
    #[must_use]
    pub fn new(source: DataSource) -> Self {
        Self {
            source,
            extension: "json".to_string(),
            show_progress: false,
        }
    }

    /// Loader set up from the pipeline configuration
    #[must_use]
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            source: config.historical_source,
            extension: config.historical_extension.clone(),
            show_progress: config.show_progress,
        }
    }

    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    #[must_use]
    pub const fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Load every snapshot file in `dir`
    ///
    /// Files are read in lexicographic name order and their observations keep file
    /// order then in-file order. A missing directory is an error; a bad file or
    /// object is not.
    pub fn load(&self, dir: &Path) -> Result<SnapshotLoad> {
        let start = std::time::Instant::now();
        log_operation_start("Loading historical snapshots from", dir);

        let files = find_files_with_extension(dir, &self.extension)?;
        let pb = create_main_progress_bar(
            files.len() as u64,
            Some("Reading snapshot files"),
            self.show_progress,
        );

        let per_file: Vec<Option<FileLoad>> = files
            .par_iter()
            .map(|path| {
                let result = self.load_file(path);
                pb.inc(1);
                result
            })
            .collect();
        finish_progress_bar(&pb, Some("Snapshot files read"));

        let mut load = SnapshotLoad::default();
        for file in per_file {
            let Some(file) = file else {
                load.files_skipped += 1;
                continue;
            };
            load.files_read += 1;
            load.chunks_total += file.chunks_total;
            load.chunks_skipped += file.chunks_skipped;
            load.observations.extend(file.observations);
        }

        log_skipped("unreadable snapshot files", load.files_skipped, Some(dir));
        log_skipped("malformed snapshot objects", load.chunks_skipped, Some(dir));
        log_operation_complete(
            "loaded",
            dir,
            load.observations.len(),
            Some(start.elapsed()),
        );
        Ok(load)
    }

    /// Parse the contents of one snapshot file
    #[must_use]
    pub fn parse_content(&self, content: &str) -> (Vec<Observation>, usize, usize) {
        let file = self.parse_chunks(content);
        (file.observations, file.chunks_total, file.chunks_skipped)
    }

    fn load_file(&self, path: &Path) -> Option<FileLoad> {
        match safe_read_to_string(path, "historical snapshot") {
            Ok(content) => Some(self.parse_chunks(&content)),
            Err(e) => {
                log_warning(&format!("Skipping snapshot file ({e})"), Some(path));
                None
            }
        }
    }

    fn parse_chunks(&self, content: &str) -> FileLoad {
        let mut file = FileLoad::default();
        for chunk in split_concatenated_objects(content) {
            file.chunks_total += 1;
            match parse_snapshot_object(chunk, self.source) {
                Some(observations) => file.observations.extend(observations),
                None => file.chunks_skipped += 1,
            }
        }
        file
    }
}

/// Split concatenated JSON objects at each `}` followed (after optional whitespace)
/// by `{`
///
/// The returned chunks are trimmed and never empty. Braces inside string values are
/// not special-cased.
#[must_use]
pub fn split_concatenated_objects(content: &str) -> Vec<&str> {
    let bytes = content.as_bytes();
    let mut chunks = Vec::new();
    let mut chunk_start = 0;

    for (idx, &byte) in bytes.iter().enumerate() {
        if byte != b'}' {
            continue;
        }
        let next = bytes[idx + 1..]
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .map(|offset| bytes[idx + 1 + offset]);
        if next == Some(b'{') {
            chunks.push(&content[chunk_start..=idx]);
            chunk_start = idx + 1;
        }
    }
    chunks.push(&content[chunk_start..]);

    chunks
        .into_iter()
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect()
}

/// Flatten one snapshot object; `None` when the chunk is malformed
///
/// Hospitals come out in the key order of the parsed map, which is sorted by name.
fn parse_snapshot_object(chunk: &str, source: DataSource) -> Option<Vec<Observation>> {
    let payload: SnapshotPayload = serde_json::from_str(chunk).ok()?;
    let timestamp = parse_timestamp(&payload.timestamp).ok()?;

    Some(
        payload
            .data
            .into_iter()
            .map(|(hospital, value)| {
                let wait_time_raw = match value {
                    Value::Null => None,
                    Value::String(text) => Some(text),
                    other => Some(other.to_string()),
                };
                Observation::new(timestamp, hospital, source, wait_time_raw)
            })
            .collect(),
    )
}
