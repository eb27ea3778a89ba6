//! Master dataset assembly
//!
//! Left-joins hospital attributes onto the enriched records, applies the missing
//! value policy and projects the fixed column order into one record batch.

pub mod columns;
pub mod missing;

use std::sync::Arc;

use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;

use crate::config::{MissingValueStrategy, PipelineConfig};
use crate::error::Result;
use crate::models::EnrichedRecord;
use crate::registry::HospitalRegistry;

pub use columns::{OutputColumn, RowView, TIMESTAMP_FORMAT};
pub use missing::{MissingOutcome, apply_missing_strategy};

/// The assembled output table and the records behind it
#[derive(Debug, Clone)]
pub struct AssembledDataset {
    pub batch: RecordBatch,
    pub records: Vec<EnrichedRecord>,
    pub missing: MissingOutcome,
}

/// Builds the output table from fully enriched records
#[derive(Debug, Clone)]
pub struct MasterDatasetAssembler<'a> {
    registry: &'a HospitalRegistry,
    windows_hours: Vec<u32>,
    volatility_window: usize,
    missing_strategy: MissingValueStrategy,
    encode_regions: bool,
}

impl<'a> MasterDatasetAssembler<'a> {
    #[must_use]
    pub fn new(registry: &'a HospitalRegistry, config: &PipelineConfig) -> Self {
        Self {
            registry,
            windows_hours: config.rolling_windows_hours.clone(),
            volatility_window: config.volatility_window,
            missing_strategy: config.missing_strategy,
            encode_regions: config.encode_regions,
        }
    }

    /// Output columns in their fixed order
    ///
    /// Attribute columns the mapping table lacks are left out, as are region
    /// indicators when encoding is off or there is no region column.
    #[must_use]
    pub fn columns(&self) -> Vec<OutputColumn> {
        let attributes = self.registry.attribute_columns();
        let mut columns = vec![
            OutputColumn::Timestamp,
            OutputColumn::HospitalId,
            OutputColumn::HospitalName,
            OutputColumn::Source,
        ];

        if attributes.region {
            columns.push(OutputColumn::Region);
        }
        if attributes.tier {
            columns.push(OutputColumn::Tier);
        }
        if attributes.has_pediatric_er {
            columns.push(OutputColumn::HasPediatricEr);
        }
        if attributes.is_trauma_centre {
            columns.push(OutputColumn::IsTraumaCentre);
        }

        columns.extend([
            OutputColumn::WaitTimeRaw,
            OutputColumn::WaitTimeMinutes,
            OutputColumn::DataAvailable,
        ]);
        columns.extend(
            self.windows_hours
                .iter()
                .enumerate()
                .map(|(index, &hours)| OutputColumn::RollingAverage { index, hours }),
        );
        columns.extend([
            OutputColumn::Trend1h,
            OutputColumn::Trend3h,
            OutputColumn::TrendDirection,
            OutputColumn::Volatility {
                records: self.volatility_window,
            },
            OutputColumn::HistoricalMean,
            OutputColumn::HistoricalMedian,
            OutputColumn::HistoricalStd,
            OutputColumn::HistoricalMin,
            OutputColumn::HistoricalMax,
            OutputColumn::Historical25th,
            OutputColumn::Historical75th,
            OutputColumn::WaitTimeVsAvg,
            OutputColumn::WaitTimePctOfMax,
            OutputColumn::IsAbove75thPercentile,
            OutputColumn::IsBelow25thPercentile,
            OutputColumn::HourOfDay,
            OutputColumn::DayOfWeek,
            OutputColumn::DayName,
            OutputColumn::DayOfMonth,
            OutputColumn::WeekOfYear,
            OutputColumn::Month,
            OutputColumn::Year,
            OutputColumn::IsWeekend,
            OutputColumn::IsWeekday,
            OutputColumn::TimeOfDay,
            OutputColumn::IsPeakHour,
            OutputColumn::IsOffPeak,
            OutputColumn::IsBusinessHours,
            OutputColumn::IsNightShift,
        ]);

        if self.encode_regions && attributes.region {
            columns.extend(
                self.registry
                    .regions()
                    .into_iter()
                    .map(|region| OutputColumn::RegionIndicator(region.to_string())),
            );
        }

        columns
    }

    /// Output schema for [`Self::columns`]
    #[must_use]
    pub fn schema(&self) -> Schema {
        Schema::new(
            self.columns()
                .iter()
                .map(OutputColumn::field)
                .collect::<Vec<_>>(),
        )
    }

    /// Apply the missing value policy and build the output batch
    ///
    /// Records keep their order; unresolved records stay in with null attributes.
    pub fn assemble(&self, records: Vec<EnrichedRecord>) -> Result<AssembledDataset> {
        let (records, missing) = apply_missing_strategy(records, self.missing_strategy);

        let rows: Vec<RowView<'_>> = records
            .iter()
            .map(|record| RowView {
                record,
                hospital: record.hospital_id().and_then(|id| self.registry.get(id)),
            })
            .collect();

        let columns = self.columns();
        let arrays = columns.iter().map(|column| column.build(&rows)).collect();
        let batch = RecordBatch::try_new(Arc::new(self.schema()), arrays)?;

        log::info!(
            "Assembled {} rows with {} columns ({} dropped, {} imputed)",
            batch.num_rows(),
            batch.num_columns(),
            missing.rows_dropped,
            missing.values_imputed
        );

        Ok(AssembledDataset {
            batch,
            records,
            missing,
        })
    }
}
