//! Calendar and time-of-day features
//!
//! Everything here is a pure function of the record's timestamp.

use chrono::{Datelike, NaiveDateTime, Timelike};
use rayon::prelude::*;

use crate::models::{EnrichedRecord, TemporalFeatures, TimeOfDay};

const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Derives [`TemporalFeatures`] for each record
#[derive(Debug, Clone, Copy, Default)]
pub struct TemporalFeatureDeriver;

impl TemporalFeatureDeriver {
    /// Compute the calendar fields of one timestamp
    #[must_use]
    pub fn derive(timestamp: NaiveDateTime) -> TemporalFeatures {
        let hour = timestamp.hour();
        let day_of_week = timestamp.weekday().num_days_from_monday();
        let is_weekend = day_of_week >= 5;

        TemporalFeatures {
            hour_of_day: hour,
            day_of_week,
            day_name: DAY_NAMES[day_of_week as usize],
            day_of_month: timestamp.day(),
            week_of_year: timestamp.iso_week().week(),
            month: timestamp.month(),
            year: timestamp.year(),
            is_weekend,
            is_weekday: !is_weekend,
            time_of_day: TimeOfDay::from_hour(hour),
            is_peak_hour: (18..=23).contains(&hour),
            is_off_peak: hour <= 5,
            is_business_hours: (9..=17).contains(&hour),
            is_night_shift: hour >= 18 || hour <= 6,
        }
    }

    /// Fill in the temporal group of every record, keeping record order
    #[must_use]
    pub fn apply(records: Vec<EnrichedRecord>) -> Vec<EnrichedRecord> {
        records
            .into_par_iter()
            .map(|mut record| {
                record.temporal = Some(Self::derive(record.timestamp()));
                record
            })
            .collect()
    }
}
