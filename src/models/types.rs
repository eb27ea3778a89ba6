//! Shared identifier and category types

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Origin of a raw hospital name
///
/// Each source spells hospital names its own way; the mapping table carries one name
/// column per source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// ER Watch feed
    ErWatch,
    /// HowLongWillIWait feed
    Hlwiw,
    /// Pediatric triage dataset
    Pediatric,
}

impl DataSource {
    /// All sources, in mapping-table column order
    pub const ALL: [DataSource; 3] = [DataSource::ErWatch, DataSource::Hlwiw, DataSource::Pediatric];

    /// Name of the mapping-table column holding this source's spelling
    #[must_use]
    pub const fn mapping_column(self) -> &'static str {
        match self {
            DataSource::ErWatch => "er_watch_name",
            DataSource::Hlwiw => "hlwiw_name",
            DataSource::Pediatric => "pediatric_dataset_name",
        }
    }

    /// Short tag used in configuration and output
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            DataSource::ErWatch => "er_watch",
            DataSource::Hlwiw => "hlwiw",
            DataSource::Pediatric => "pediatric",
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            DataSource::ErWatch => 0,
            DataSource::Hlwiw => 1,
            DataSource::Pediatric => 2,
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "er_watch" | "erwatch" => Ok(DataSource::ErWatch),
            "hlwiw" => Ok(DataSource::Hlwiw),
            "pediatric" => Ok(DataSource::Pediatric),
            other => Err(format!("Unknown data source: {other}")),
        }
    }
}

/// Stable key of a canonical hospital
///
/// Stored as text so both numeric and coded ids from the mapping table are accepted.
/// Ids that are both whole numbers order numerically; otherwise they order as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HospitalId(pub String);

impl Ord for HospitalId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0.parse::<u64>(), other.0.parse::<u64>()) {
            (Ok(left), Ok(right)) => left.cmp(&right).then_with(|| self.0.cmp(&other.0)),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(_), Err(_)) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for HospitalId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl HospitalId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HospitalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HospitalId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for HospitalId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Grouping key of a hospital time series
///
/// Resolved records group by canonical id; unresolved records fall back to their raw
/// name so they still get their own series instead of being merged or dropped.
/// Ordering puts every resolved hospital before the unresolved names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeriesKey {
    Resolved(HospitalId),
    Unresolved(String),
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesKey::Resolved(id) => write!(f, "{id}"),
            SeriesKey::Unresolved(name) => write!(f, "unmapped:{name}"),
        }
    }
}

/// Coarse time-of-day bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeOfDay {
    /// Hours 0-5
    Night,
    /// Hours 6-11
    Morning,
    /// Hours 12-17
    Afternoon,
    /// Hours 18-23
    Evening,
}

impl TimeOfDay {
    /// Bucket an hour of day using half-open six-hour bins
    #[must_use]
    pub const fn from_hour(hour: u32) -> Self {
        match hour {
            0..=5 => TimeOfDay::Night,
            6..=11 => TimeOfDay::Morning,
            12..=17 => TimeOfDay::Afternoon,
            _ => TimeOfDay::Evening,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TimeOfDay::Night => "night",
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
