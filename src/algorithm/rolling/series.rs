//! Grouping of records into per-hospital time series

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::models::{EnrichedRecord, SeriesKey};

/// The records of one hospital in ascending timestamp order
///
/// Records with equal timestamps keep their input order.
#[derive(Debug, Clone)]
pub struct HospitalTimeSeries {
    pub key: SeriesKey,
    pub records: Vec<EnrichedRecord>,
}

impl HospitalTimeSeries {
    /// Build a series, sorting the records by timestamp
    #[must_use]
    pub fn new(key: SeriesKey, mut records: Vec<EnrichedRecord>) -> Self {
        records.sort_by_key(EnrichedRecord::timestamp);
        Self { key, records }
    }

    #[must_use]
    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.records.iter().map(EnrichedRecord::timestamp).collect()
    }

    /// Parsed minutes in series order, `None` where unavailable
    #[must_use]
    pub fn minutes(&self) -> Vec<Option<f64>> {
        self.records.iter().map(EnrichedRecord::minutes).collect()
    }

    /// Only the present minutes, in series order
    #[must_use]
    pub fn present_minutes(&self) -> Vec<f64> {
        self.records.iter().filter_map(EnrichedRecord::minutes).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Split records into one series per hospital, ordered by series key
#[must_use]
pub fn group_by_hospital(records: Vec<EnrichedRecord>) -> Vec<HospitalTimeSeries> {
    let mut groups: BTreeMap<SeriesKey, Vec<EnrichedRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.series_key()).or_default().push(record);
    }

    groups
        .into_iter()
        .map(|(key, records)| HospitalTimeSeries::new(key, records))
        .collect()
}

/// Concatenate series back into one record list, keeping series order
#[must_use]
pub fn flatten(series: Vec<HospitalTimeSeries>) -> Vec<EnrichedRecord> {
    series.into_iter().flat_map(|s| s.records).collect()
}
