//! Configuration for the feature pipeline.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::util::safe_read_to_string;
use crate::error::{Error, Result};
use crate::models::DataSource;

/// Canonical rolling windows, in hours
pub const DEFAULT_ROLLING_WINDOWS_HOURS: [u32; 4] = [1, 6, 24, 168];

/// Number of trailing records used for volatility
pub const DEFAULT_VOLATILITY_WINDOW: usize = 6;

/// How records without a usable wait time are treated in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingValueStrategy {
    /// Keep the row, leave minutes empty and `data_available = false`
    #[default]
    Flag,
    /// Remove the row
    Drop,
    /// Fill with the mean wait time of the same hospital
    Mean,
    /// Fill with the last known value of the same hospital, in time order
    ForwardFill,
}

impl FromStr for MissingValueStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flag" => Ok(Self::Flag),
            "drop" => Ok(Self::Drop),
            "mean" => Ok(Self::Mean),
            "forward_fill" | "ffill" => Ok(Self::ForwardFill),
            other => Err(format!("Unknown missing-value strategy: {other}")),
        }
    }
}

impl fmt::Display for MissingValueStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Flag => "flag",
            Self::Drop => "drop",
            Self::Mean => "mean",
            Self::ForwardFill => "forward_fill",
        };
        f.write_str(label)
    }
}

/// Configuration for a pipeline run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Rolling window lengths in hours; one output column per entry, in this order
    pub rolling_windows_hours: Vec<u32>,
    /// Trailing record count for the volatility statistic
    pub volatility_window: usize,
    /// Treatment of unavailable wait times in the output
    pub missing_strategy: MissingValueStrategy,
    /// Source whose name column resolves hospitals in the historical snapshots
    pub historical_source: DataSource,
    /// Source whose name column resolves hospitals in the current snapshot table
    pub snapshot_source: DataSource,
    /// File extension of historical snapshot files
    pub historical_extension: String,
    /// Append one boolean column per region
    pub encode_regions: bool,
    /// Worker threads for per-hospital processing; `None` uses all CPUs
    pub num_threads: Option<usize>,
    /// Show progress bars while loading
    pub show_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            rolling_windows_hours: DEFAULT_ROLLING_WINDOWS_HOURS.to_vec(),
            volatility_window: DEFAULT_VOLATILITY_WINDOW,
            missing_strategy: MissingValueStrategy::default(),
            historical_source: DataSource::Hlwiw,
            snapshot_source: DataSource::Hlwiw,
            historical_extension: "json".to_string(),
            encode_regions: false,
            num_threads: None,
            show_progress: true,
        }
    }
}

impl PipelineConfig {
    /// Create a new configuration with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a configuration from a TOML file; absent keys keep their defaults
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = safe_read_to_string(path, "pipeline configuration")?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no pipeline stage can honour
    pub fn validate(&self) -> Result<()> {
        if self.rolling_windows_hours.is_empty() {
            return Err(Error::InvalidConfig(
                "at least one rolling window is required".to_string(),
            ));
        }
        if self.rolling_windows_hours.contains(&0) {
            return Err(Error::InvalidConfig(
                "rolling windows must be at least one hour".to_string(),
            ));
        }
        if self.volatility_window == 0 {
            return Err(Error::InvalidConfig(
                "volatility window must cover at least one record".to_string(),
            ));
        }
        if self.num_threads == Some(0) {
            return Err(Error::InvalidConfig("thread count must be positive".to_string()));
        }
        Ok(())
    }

    /// Effective worker thread count
    #[must_use]
    pub fn thread_count(&self) -> usize {
        self.num_threads.unwrap_or_else(num_cpus::get)
    }

    #[must_use]
    pub fn with_rolling_windows(mut self, hours: Vec<u32>) -> Self {
        self.rolling_windows_hours = hours;
        self
    }

    #[must_use]
    pub const fn with_volatility_window(mut self, records: usize) -> Self {
        self.volatility_window = records;
        self
    }

    #[must_use]
    pub const fn with_missing_strategy(mut self, strategy: MissingValueStrategy) -> Self {
        self.missing_strategy = strategy;
        self
    }

    #[must_use]
    pub const fn with_historical_source(mut self, source: DataSource) -> Self {
        self.historical_source = source;
        self
    }

    #[must_use]
    pub const fn with_snapshot_source(mut self, source: DataSource) -> Self {
        self.snapshot_source = source;
        self
    }

    #[must_use]
    pub const fn with_region_encoding(mut self, enabled: bool) -> Self {
        self.encode_regions = enabled;
        self
    }

    #[must_use]
    pub const fn with_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    #[must_use]
    pub const fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }
}

impl fmt::Display for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pipeline Configuration:")?;
        writeln!(f, "  Rolling Windows (h): {:?}", self.rolling_windows_hours)?;
        writeln!(f, "  Volatility Window: {} records", self.volatility_window)?;
        writeln!(f, "  Missing Values: {}", self.missing_strategy)?;
        writeln!(f, "  Historical Source: {}", self.historical_source)?;
        writeln!(f, "  Snapshot Source: {}", self.snapshot_source)?;
        writeln!(f, "  Region Encoding: {}", self.encode_regions)?;
        writeln!(f, "  Threads: {}", self.thread_count())?;
        Ok(())
    }
}
