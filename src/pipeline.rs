//! End-to-end feature pipeline
//!
//! Stages run in a fixed order, each handing its records to the next by value:
//! load, resolve and parse, rolling and trend features, temporal features, assembly.

use std::fmt;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::algorithm::{
    AssembledDataset, MasterDatasetAssembler, RollingAndTrendEngine, TemporalFeatureDeriver,
};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::loader::{HistoricalSeriesLoader, load_snapshot_table};
use crate::models::{EnrichedRecord, Observation, ParsedWaitTime};
use crate::parse;
use crate::registry::HospitalRegistry;
use crate::utils::io::write_table;
use crate::utils::logging::{create_spinner, log_warning};

/// Input locations for one run; at least one should be set
#[derive(Debug, Clone, Default)]
pub struct PipelineInputs {
    /// Directory of concatenated-JSON snapshot files
    pub historical_dir: Option<PathBuf>,
    /// Current snapshot table (CSV or Parquet)
    pub snapshot_table: Option<PathBuf>,
}

/// Counts collected while the pipeline runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub observations: usize,
    pub files_read: usize,
    pub files_skipped: usize,
    pub chunks_total: usize,
    pub chunks_skipped: usize,
    pub rows_missing_name: usize,
    pub parsed: usize,
    pub unavailable: usize,
    pub resolved: usize,
    pub unresolved: usize,
    pub rows_dropped: usize,
    pub values_imputed: usize,
    pub output_rows: usize,
}

impl fmt::Display for PipelineStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pipeline summary:")?;
        writeln!(f, "  Observations: {}", self.observations)?;
        writeln!(
            f,
            "  Snapshot files: {} read, {} skipped",
            self.files_read, self.files_skipped
        )?;
        writeln!(
            f,
            "  Snapshot objects: {} total, {} malformed",
            self.chunks_total, self.chunks_skipped
        )?;
        writeln!(f, "  Rows without hospital name: {}", self.rows_missing_name)?;
        writeln!(
            f,
            "  Wait times: {} parsed, {} unavailable",
            self.parsed, self.unavailable
        )?;
        writeln!(
            f,
            "  Hospitals: {} resolved, {} unresolved",
            self.resolved, self.unresolved
        )?;
        writeln!(
            f,
            "  Missing values: {} rows dropped, {} imputed",
            self.rows_dropped, self.values_imputed
        )?;
        write!(f, "  Output rows: {}", self.output_rows)
    }
}

/// Result of a run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub dataset: AssembledDataset,
    pub stats: PipelineStats,
}

/// The feature pipeline bound to one loaded mapping table
#[derive(Debug, Clone)]
pub struct FeaturePipeline<'a> {
    registry: &'a HospitalRegistry,
    config: PipelineConfig,
}

impl<'a> FeaturePipeline<'a> {
    #[must_use]
    pub const fn new(registry: &'a HospitalRegistry, config: PipelineConfig) -> Self {
        Self { registry, config }
    }

    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load every configured input into one observation list
    ///
    /// Historical snapshots come first, then the current snapshot table.
    pub fn load_observations(
        &self,
        inputs: &PipelineInputs,
        stats: &mut PipelineStats,
    ) -> Result<Vec<Observation>> {
        let mut observations = Vec::new();

        if let Some(dir) = &inputs.historical_dir {
            let load = HistoricalSeriesLoader::from_config(&self.config).load(dir)?;
            stats.files_read += load.files_read;
            stats.files_skipped += load.files_skipped;
            stats.chunks_total += load.chunks_total;
            stats.chunks_skipped += load.chunks_skipped;
            observations.extend(load.observations);
        }

        if let Some(path) = &inputs.snapshot_table {
            let rows = load_snapshot_table(path, self.config.snapshot_source)?;
            stats.rows_missing_name += rows.rows_missing_name;
            observations.extend(rows.observations);
        }

        if observations.is_empty() {
            log_warning("No observations were loaded", None);
        }
        Ok(observations)
    }

    /// Resolve hospital names and parse wait times, keeping input order
    #[must_use]
    pub fn resolve_and_parse(
        &self,
        observations: Vec<Observation>,
        stats: &mut PipelineStats,
    ) -> Vec<EnrichedRecord> {
        let records: Vec<EnrichedRecord> = observations
            .into_par_iter()
            .map(|observation| {
                let resolution = self
                    .registry
                    .resolve(Some(&observation.hospital_raw_name), observation.source);
                let wait_time: ParsedWaitTime = parse::parse(observation.wait_time_raw.as_deref());
                EnrichedRecord::new(observation, resolution, wait_time)
            })
            .collect();

        stats.observations += records.len();
        stats.parsed += records.iter().filter(|r| r.data_available).count();
        stats.unavailable += records.iter().filter(|r| !r.data_available).count();
        stats.resolved += records.iter().filter(|r| r.resolution.is_resolved()).count();
        stats.unresolved += records.iter().filter(|r| !r.resolution.is_resolved()).count();

        log::info!(
            "Parsed {} of {} wait times, resolved {} of {} hospital names",
            stats.parsed,
            stats.observations,
            stats.resolved,
            stats.observations
        );
        records
    }

    /// Run every stage after loading on `observations`
    pub fn run(&self, observations: Vec<Observation>) -> Result<PipelineOutput> {
        self.run_with_stats(observations, PipelineStats::default())
    }

    /// Load the inputs, then run every stage
    pub fn run_from_inputs(&self, inputs: &PipelineInputs) -> Result<PipelineOutput> {
        let mut stats = PipelineStats::default();
        let observations = self.load_observations(inputs, &mut stats)?;
        self.run_with_stats(observations, stats)
    }

    fn run_with_stats(
        &self,
        observations: Vec<Observation>,
        mut stats: PipelineStats,
    ) -> Result<PipelineOutput> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.thread_count())
            .build()?;
        log::info!(
            "Using parallel processing with {} threads",
            pool.current_num_threads()
        );

        let dataset = pool.install(|| {
            let records = self.resolve_and_parse(observations, &mut stats);
            let records = RollingAndTrendEngine::new(&self.config).apply(records);

            let spinner = create_spinner(Some("Deriving temporal features"), self.config.show_progress);
            let records = TemporalFeatureDeriver::apply(records);
            spinner.finish_and_clear();

            MasterDatasetAssembler::new(self.registry, &self.config).assemble(records)
        })?;

        stats.rows_dropped = dataset.missing.rows_dropped;
        stats.values_imputed = dataset.missing.values_imputed;
        stats.output_rows = dataset.batch.num_rows();

        Ok(PipelineOutput { dataset, stats })
    }
}

/// Write the assembled table; the format follows the file extension
pub fn write_output(path: &Path, output: &PipelineOutput) -> Result<()> {
    write_table(path, &output.dataset.batch)
}
