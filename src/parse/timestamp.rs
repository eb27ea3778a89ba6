//! Timestamp parsing for snapshot inputs
//!
//! Snapshots carry timestamps as text in a handful of layouts. Offsets are dropped
//! and the written wall-clock time is kept, since the temporal features describe
//! the local hour at the hospital.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{Error, Result};

/// Date-time layouts tried in order
const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date-only layouts, read as midnight
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Parse a snapshot timestamp
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let trimmed = value.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(with_offset.naive_local());
    }

    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
                return Ok(midnight);
            }
        }
    }

    Err(Error::InvalidTimestamp {
        value: value.to_string(),
    })
}
