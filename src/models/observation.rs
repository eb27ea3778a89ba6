//! Raw observations and their parsed wait time

use chrono::NaiveDateTime;

use crate::models::types::DataSource;

/// One raw wait-time reading for one hospital at one instant
///
/// Produced by the loaders and never modified afterwards. `wait_time_raw` is `None`
/// when the source carried no value at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub timestamp: NaiveDateTime,
    pub hospital_raw_name: String,
    pub source: DataSource,
    pub wait_time_raw: Option<String>,
}

impl Observation {
    pub fn new(
        timestamp: NaiveDateTime,
        hospital_raw_name: impl Into<String>,
        source: DataSource,
        wait_time_raw: Option<String>,
    ) -> Self {
        Self {
            timestamp,
            hospital_raw_name: hospital_raw_name.into(),
            source,
            wait_time_raw,
        }
    }
}

/// Numeric wait time derived from the raw text
///
/// `minutes` is `None` whenever the text denoted "unavailable" or could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParsedWaitTime {
    pub minutes: Option<f64>,
}

impl ParsedWaitTime {
    #[must_use]
    pub const fn new(minutes: Option<f64>) -> Self {
        Self { minutes }
    }

    #[must_use]
    pub const fn unavailable() -> Self {
        Self { minutes: None }
    }

    /// Whether a usable value was parsed
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.minutes.is_some()
    }
}
