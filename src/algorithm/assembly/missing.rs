//! Missing wait-time policies
//!
//! Imputation only touches records of resolved hospitals; unresolved names have
//! no hospital to borrow a mean or a previous value from. `data_available` keeps
//! reporting the parsed value.

use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::config::MissingValueStrategy;
use crate::models::{EnrichedRecord, HospitalId};

/// What a policy changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MissingOutcome {
    pub rows_dropped: usize,
    pub values_imputed: usize,
}

/// Apply `strategy` to the `minutes` of every record
#[must_use]
pub fn apply_missing_strategy(
    records: Vec<EnrichedRecord>,
    strategy: MissingValueStrategy,
) -> (Vec<EnrichedRecord>, MissingOutcome) {
    match strategy {
        MissingValueStrategy::Flag => (records, MissingOutcome::default()),
        MissingValueStrategy::Drop => {
            let before = records.len();
            let kept: Vec<_> = records.into_iter().filter(|r| r.minutes().is_some()).collect();
            let outcome = MissingOutcome {
                rows_dropped: before - kept.len(),
                values_imputed: 0,
            };
            (kept, outcome)
        }
        MissingValueStrategy::Mean => impute_hospital_mean(records),
        MissingValueStrategy::ForwardFill => forward_fill(records),
    }
}

fn impute_hospital_mean(mut records: Vec<EnrichedRecord>) -> (Vec<EnrichedRecord>, MissingOutcome) {
    let mut totals: FxHashMap<HospitalId, (f64, usize)> = FxHashMap::default();
    for record in &records {
        if let (Some(id), Some(minutes)) = (record.hospital_id(), record.minutes()) {
            let entry = totals.entry(id.clone()).or_insert((0.0, 0));
            entry.0 += minutes;
            entry.1 += 1;
        }
    }

    let mut outcome = MissingOutcome::default();
    for record in &mut records {
        if record.minutes().is_some() {
            continue;
        }
        let mean = record
            .hospital_id()
            .and_then(|id| totals.get(id))
            .map(|&(sum, count)| sum / count as f64);
        if mean.is_some() {
            record.wait_time.minutes = mean;
            outcome.values_imputed += 1;
        }
    }

    (records, outcome)
}

/// Carry the last known value forward within each resolved hospital, in time order
fn forward_fill(mut records: Vec<EnrichedRecord>) -> (Vec<EnrichedRecord>, MissingOutcome) {
    let order = (0..records.len())
        .sorted_by_key(|&idx| (records[idx].hospital_id().cloned(), records[idx].timestamp()))
        .collect_vec();

    let mut last_known: FxHashMap<HospitalId, f64> = FxHashMap::default();
    let mut outcome = MissingOutcome::default();
    for idx in order {
        let record = &mut records[idx];
        let Some(id) = record.resolution.hospital_id.clone() else {
            continue;
        };
        match record.minutes() {
            Some(minutes) => {
                last_known.insert(id, minutes);
            }
            None => {
                if let Some(&previous) = last_known.get(&id) {
                    record.wait_time.minutes = Some(previous);
                    outcome.values_imputed += 1;
                }
            }
        }
    }

    (records, outcome)
}
