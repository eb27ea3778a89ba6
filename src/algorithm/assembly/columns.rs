//! Output columns of the master dataset
//!
//! [`OutputColumn`] is the closed list of columns the assembler can emit. Each
//! variant knows its name, Arrow type and how to build its array from the rows.

use std::sync::Arc;

use arrow::array::{
    ArrayRef, BooleanArray, Float64Array, Int8Array, Int32Array, StringArray, UInt8Array,
    UInt32Array,
};
use arrow::datatypes::{DataType, Field};

use crate::models::{EnrichedRecord, HospitalBenchmark, HospitalIdentity, TemporalFeatures};

/// Layout of the `timestamp` column
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// One output row: the record and the identity it joined to, if any
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    pub record: &'a EnrichedRecord,
    pub hospital: Option<&'a HospitalIdentity>,
}

impl RowView<'_> {
    fn temporal(&self) -> Option<&TemporalFeatures> {
        self.record.temporal.as_ref()
    }

    fn benchmark(&self) -> Option<HospitalBenchmark> {
        self.record.benchmark.benchmark
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputColumn {
    Timestamp,
    HospitalId,
    HospitalName,
    Source,
    Region,
    Tier,
    HasPediatricEr,
    IsTraumaCentre,
    WaitTimeRaw,
    WaitTimeMinutes,
    DataAvailable,
    /// Rolling mean for the window at `index` of the configured list
    RollingAverage { index: usize, hours: u32 },
    Trend1h,
    Trend3h,
    TrendDirection,
    Volatility { records: usize },
    HistoricalMean,
    HistoricalMedian,
    HistoricalStd,
    HistoricalMin,
    HistoricalMax,
    Historical25th,
    Historical75th,
    WaitTimeVsAvg,
    WaitTimePctOfMax,
    IsAbove75thPercentile,
    IsBelow25thPercentile,
    HourOfDay,
    DayOfWeek,
    DayName,
    DayOfMonth,
    WeekOfYear,
    Month,
    Year,
    IsWeekend,
    IsWeekday,
    TimeOfDay,
    IsPeakHour,
    IsOffPeak,
    IsBusinessHours,
    IsNightShift,
    /// Whether the joined hospital lies in the named region
    RegionIndicator(String),
}

impl OutputColumn {
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Timestamp => "timestamp".into(),
            Self::HospitalId => "hospital_id".into(),
            Self::HospitalName => "hospital_name".into(),
            Self::Source => "source".into(),
            Self::Region => "region".into(),
            Self::Tier => "tier".into(),
            Self::HasPediatricEr => "has_pediatric_er".into(),
            Self::IsTraumaCentre => "is_trauma_centre".into(),
            Self::WaitTimeRaw => "wait_time_raw".into(),
            Self::WaitTimeMinutes => "wait_time_minutes".into(),
            Self::DataAvailable => "data_available".into(),
            Self::RollingAverage { hours, .. } => format!("wait_time_rolling_{hours}h"),
            Self::Trend1h => "trend_1h".into(),
            Self::Trend3h => "trend_3h".into(),
            Self::TrendDirection => "trend_direction".into(),
            Self::Volatility { records } => format!("volatility_{records}h"),
            Self::HistoricalMean => "historical_mean".into(),
            Self::HistoricalMedian => "historical_median".into(),
            Self::HistoricalStd => "historical_std".into(),
            Self::HistoricalMin => "historical_min".into(),
            Self::HistoricalMax => "historical_max".into(),
            Self::Historical25th => "historical_25th".into(),
            Self::Historical75th => "historical_75th".into(),
            Self::WaitTimeVsAvg => "wait_time_vs_avg".into(),
            Self::WaitTimePctOfMax => "wait_time_pct_of_max".into(),
            Self::IsAbove75thPercentile => "is_above_75th_percentile".into(),
            Self::IsBelow25thPercentile => "is_below_25th_percentile".into(),
            Self::HourOfDay => "hour_of_day".into(),
            Self::DayOfWeek => "day_of_week".into(),
            Self::DayName => "day_name".into(),
            Self::DayOfMonth => "day_of_month".into(),
            Self::WeekOfYear => "week_of_year".into(),
            Self::Month => "month".into(),
            Self::Year => "year".into(),
            Self::IsWeekend => "is_weekend".into(),
            Self::IsWeekday => "is_weekday".into(),
            Self::TimeOfDay => "time_of_day".into(),
            Self::IsPeakHour => "is_peak_hour".into(),
            Self::IsOffPeak => "is_off_peak".into(),
            Self::IsBusinessHours => "is_business_hours".into(),
            Self::IsNightShift => "is_night_shift".into(),
            Self::RegionIndicator(region) => format!("region_{region}"),
        }
    }

    #[must_use]
    pub fn data_type(&self) -> DataType {
        match self {
            Self::Timestamp
            | Self::HospitalId
            | Self::HospitalName
            | Self::Source
            | Self::Region
            | Self::WaitTimeRaw
            | Self::DayName
            | Self::TimeOfDay => DataType::Utf8,
            Self::Tier => DataType::UInt8,
            Self::TrendDirection => DataType::Int8,
            Self::Year => DataType::Int32,
            Self::HourOfDay
            | Self::DayOfWeek
            | Self::DayOfMonth
            | Self::WeekOfYear
            | Self::Month => DataType::UInt32,
            Self::HasPediatricEr
            | Self::IsTraumaCentre
            | Self::DataAvailable
            | Self::IsAbove75thPercentile
            | Self::IsBelow25thPercentile
            | Self::IsWeekend
            | Self::IsWeekday
            | Self::IsPeakHour
            | Self::IsOffPeak
            | Self::IsBusinessHours
            | Self::IsNightShift
            | Self::RegionIndicator(_) => DataType::Boolean,
            Self::WaitTimeMinutes
            | Self::RollingAverage { .. }
            | Self::Trend1h
            | Self::Trend3h
            | Self::Volatility { .. }
            | Self::HistoricalMean
            | Self::HistoricalMedian
            | Self::HistoricalStd
            | Self::HistoricalMin
            | Self::HistoricalMax
            | Self::Historical25th
            | Self::Historical75th
            | Self::WaitTimeVsAvg
            | Self::WaitTimePctOfMax => DataType::Float64,
        }
    }

    /// Columns that always have a value
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        !matches!(
            self,
            Self::Timestamp
                | Self::HospitalName
                | Self::Source
                | Self::DataAvailable
                | Self::RegionIndicator(_)
        )
    }

    #[must_use]
    pub fn field(&self) -> Field {
        Field::new(self.name(), self.data_type(), self.is_nullable())
    }

    /// Build this column's array over `rows`
    #[must_use]
    pub fn build(&self, rows: &[RowView<'_>]) -> ArrayRef {
        match self {
            Self::Timestamp => strings(rows, |r| {
                Some(r.record.timestamp().format(TIMESTAMP_FORMAT).to_string())
            }),
            Self::HospitalId => strings(rows, |r| r.record.hospital_id().map(ToString::to_string)),
            Self::HospitalName => strings(rows, |r| Some(r.record.hospital_name().to_string())),
            Self::Source => strings(rows, |r| Some(r.record.observation.source.to_string())),
            Self::Region => strings(rows, |r| r.hospital.and_then(|h| h.region.clone())),
            Self::Tier => Arc::new(rows.iter().map(|r| r.hospital.map(|h| h.tier)).collect::<UInt8Array>()),
            Self::HasPediatricEr => booleans(rows, |r| r.hospital.and_then(|h| h.has_pediatric_er)),
            Self::IsTraumaCentre => booleans(rows, |r| r.hospital.and_then(|h| h.is_trauma_centre)),
            Self::WaitTimeRaw => strings(rows, |r| r.record.observation.wait_time_raw.clone()),
            Self::WaitTimeMinutes => floats(rows, |r| r.record.minutes()),
            Self::DataAvailable => booleans(rows, |r| Some(r.record.data_available)),
            Self::RollingAverage { index, .. } => floats(rows, |r| {
                r.record.rolling.averages.get(*index).copied().flatten()
            }),
            Self::Trend1h => floats(rows, |r| r.record.trend.trend_1h),
            Self::Trend3h => floats(rows, |r| r.record.trend.trend_3h),
            Self::TrendDirection => Arc::new(
                rows.iter()
                    .map(|r| r.record.trend.trend_direction)
                    .collect::<Int8Array>(),
            ),
            Self::Volatility { .. } => floats(rows, |r| r.record.trend.volatility),
            Self::HistoricalMean => floats(rows, |r| r.benchmark().map(|b| b.mean)),
            Self::HistoricalMedian => floats(rows, |r| r.benchmark().map(|b| b.median)),
            Self::HistoricalStd => floats(rows, |r| r.benchmark().and_then(|b| b.std)),
            Self::HistoricalMin => floats(rows, |r| r.benchmark().map(|b| b.min)),
            Self::HistoricalMax => floats(rows, |r| r.benchmark().map(|b| b.max)),
            Self::Historical25th => floats(rows, |r| r.benchmark().map(|b| b.p25)),
            Self::Historical75th => floats(rows, |r| r.benchmark().map(|b| b.p75)),
            Self::WaitTimeVsAvg => floats(rows, |r| r.record.benchmark.wait_time_vs_avg),
            Self::WaitTimePctOfMax => floats(rows, |r| r.record.benchmark.wait_time_pct_of_max),
            Self::IsAbove75thPercentile => {
                booleans(rows, |r| r.record.benchmark.is_above_75th_percentile)
            }
            Self::IsBelow25thPercentile => {
                booleans(rows, |r| r.record.benchmark.is_below_25th_percentile)
            }
            Self::HourOfDay => counts(rows, |t| t.hour_of_day),
            Self::DayOfWeek => counts(rows, |t| t.day_of_week),
            Self::DayName => strings(rows, |r| r.temporal().map(|t| t.day_name.to_string())),
            Self::DayOfMonth => counts(rows, |t| t.day_of_month),
            Self::WeekOfYear => counts(rows, |t| t.week_of_year),
            Self::Month => counts(rows, |t| t.month),
            Self::Year => Arc::new(
                rows.iter()
                    .map(|r| r.temporal().map(|t| t.year))
                    .collect::<Int32Array>(),
            ),
            Self::IsWeekend => booleans(rows, |r| r.temporal().map(|t| t.is_weekend)),
            Self::IsWeekday => booleans(rows, |r| r.temporal().map(|t| t.is_weekday)),
            Self::TimeOfDay => strings(rows, |r| r.temporal().map(|t| t.time_of_day.to_string())),
            Self::IsPeakHour => booleans(rows, |r| r.temporal().map(|t| t.is_peak_hour)),
            Self::IsOffPeak => booleans(rows, |r| r.temporal().map(|t| t.is_off_peak)),
            Self::IsBusinessHours => booleans(rows, |r| r.temporal().map(|t| t.is_business_hours)),
            Self::IsNightShift => booleans(rows, |r| r.temporal().map(|t| t.is_night_shift)),
            Self::RegionIndicator(region) => booleans(rows, |r| {
                Some(r.hospital.and_then(|h| h.region.as_deref()) == Some(region.as_str()))
            }),
        }
    }
}

fn strings(rows: &[RowView<'_>], value: impl Fn(&RowView<'_>) -> Option<String>) -> ArrayRef {
    Arc::new(rows.iter().map(value).collect::<StringArray>())
}

fn floats(rows: &[RowView<'_>], value: impl Fn(&RowView<'_>) -> Option<f64>) -> ArrayRef {
    Arc::new(rows.iter().map(value).collect::<Float64Array>())
}

fn booleans(rows: &[RowView<'_>], value: impl Fn(&RowView<'_>) -> Option<bool>) -> ArrayRef {
    Arc::new(rows.iter().map(value).collect::<BooleanArray>())
}

fn counts(rows: &[RowView<'_>], value: impl Fn(&TemporalFeatures) -> u32) -> ArrayRef {
    Arc::new(
        rows.iter()
            .map(|r| r.temporal().map(&value))
            .collect::<UInt32Array>(),
    )
}
