use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;

use triage_link::loader::{load_ctas_conditions, write_ctas_conditions};
use triage_link::pipeline::write_output;
use triage_link::utils::logging::console::{print_batch_summary, print_schema_info};
use triage_link::{
    DataSource, FeaturePipeline, HospitalRegistry, MissingValueStrategy, PipelineConfig,
    PipelineInputs,
};

/// Build the emergency-room wait-time feature table.
#[derive(Parser, Debug)]
#[command(name = "triage-link", version, about = "Derive wait-time features per hospital")]
struct Cli {
    /// Hospital mapping table (CSV or Parquet)
    #[arg(long)]
    mapping: PathBuf,

    /// Directory of concatenated-JSON historical snapshot files
    #[arg(long)]
    historical_dir: Option<PathBuf>,

    /// Current wait-time snapshot table (CSV or Parquet)
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Output feature table; `.csv` or `.parquet`
    #[arg(long, short)]
    output: PathBuf,

    /// CTAS reference table to score
    #[arg(long, requires = "ctas_output")]
    ctas: Option<PathBuf>,

    /// Where to write the scored CTAS table
    #[arg(long)]
    ctas_output: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Missing wait-time policy: flag, drop, mean or forward_fill
    #[arg(long)]
    missing_strategy: Option<MissingValueStrategy>,

    /// Source tag of the historical snapshots
    #[arg(long)]
    historical_source: Option<DataSource>,

    /// Source tag of the current snapshot table
    #[arg(long)]
    snapshot_source: Option<DataSource>,

    /// Rolling windows in hours, comma separated
    #[arg(long, value_delimiter = ',')]
    windows: Vec<u32>,

    /// Worker threads
    #[arg(long)]
    threads: Option<usize>,

    /// Add one indicator column per region
    #[arg(long)]
    encode_regions: bool,

    /// Hide progress bars
    #[arg(long)]
    no_progress: bool,

    /// Print the output schema after writing
    #[arg(long)]
    print_schema: bool,
}

impl Cli {
    fn pipeline_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_toml_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => PipelineConfig::new(),
        };

        if let Some(strategy) = self.missing_strategy {
            config = config.with_missing_strategy(strategy);
        }
        if let Some(source) = self.historical_source {
            config = config.with_historical_source(source);
        }
        if let Some(source) = self.snapshot_source {
            config = config.with_snapshot_source(source);
        }
        if !self.windows.is_empty() {
            config = config.with_rolling_windows(self.windows.clone());
        }
        if let Some(threads) = self.threads {
            config = config.with_threads(threads);
        }
        if self.encode_regions {
            config = config.with_region_encoding(true);
        }
        if self.no_progress {
            config = config.without_progress();
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if cli.historical_dir.is_none() && cli.snapshot.is_none() {
        bail!("At least one of --historical-dir or --snapshot is required");
    }

    let config = cli.pipeline_config()?;
    info!("{config}");

    let start = Instant::now();
    let registry = HospitalRegistry::load(&cli.mapping)
        .with_context(|| format!("Failed to load hospital mapping {}", cli.mapping.display()))?;

    let inputs = PipelineInputs {
        historical_dir: cli.historical_dir.clone(),
        snapshot_table: cli.snapshot.clone(),
    };
    let output = FeaturePipeline::new(&registry, config)
        .run_from_inputs(&inputs)
        .context("Feature pipeline failed")?;

    write_output(&cli.output, &output)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;

    println!("{}", output.stats);
    print_batch_summary(&output.dataset.batch, start.elapsed());
    if cli.print_schema {
        print_schema_info(&output.dataset.batch);
    }

    if let (Some(ctas), Some(ctas_output)) = (&cli.ctas, &cli.ctas_output) {
        let conditions = load_ctas_conditions(ctas)
            .with_context(|| format!("Failed to load CTAS reference {}", ctas.display()))?;
        write_ctas_conditions(ctas_output, &conditions)
            .with_context(|| format!("Failed to write {}", ctas_output.display()))?;
        info!("Scored {} CTAS conditions", conditions.len());
    }

    Ok(())
}
