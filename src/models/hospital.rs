//! Canonical hospital identity and attributes

use crate::models::types::{DataSource, HospitalId};

/// One row of the hospital mapping table
///
/// Attribute fields are `Option` because the mapping table may omit the column
/// entirely; [`AttributeColumns`] records which columns were present.
#[derive(Debug, Clone, PartialEq)]
pub struct HospitalIdentity {
    pub hospital_id: HospitalId,
    pub standard_name: String,
    pub er_watch_name: Option<String>,
    pub hlwiw_name: Option<String>,
    pub pediatric_dataset_name: Option<String>,
    pub region: Option<String>,
    /// Pediatric tier, 0 when the hospital has none
    pub tier: u8,
    pub has_pediatric_er: Option<bool>,
    pub is_trauma_centre: Option<bool>,
}

impl HospitalIdentity {
    /// Create an identity with only the required fields set
    pub fn new(hospital_id: impl Into<HospitalId>, standard_name: impl Into<String>) -> Self {
        Self {
            hospital_id: hospital_id.into(),
            standard_name: standard_name.into(),
            er_watch_name: None,
            hlwiw_name: None,
            pediatric_dataset_name: None,
            region: None,
            tier: 0,
            has_pediatric_er: None,
            is_trauma_centre: None,
        }
    }

    /// The spelling of this hospital's name used by `source`
    #[must_use]
    pub fn source_name(&self, source: DataSource) -> Option<&str> {
        match source {
            DataSource::ErWatch => self.er_watch_name.as_deref(),
            DataSource::Hlwiw => self.hlwiw_name.as_deref(),
            DataSource::Pediatric => self.pediatric_dataset_name.as_deref(),
        }
    }

    #[must_use]
    pub fn with_source_name(mut self, source: DataSource, name: impl Into<String>) -> Self {
        let name = Some(name.into());
        match source {
            DataSource::ErWatch => self.er_watch_name = name,
            DataSource::Hlwiw => self.hlwiw_name = name,
            DataSource::Pediatric => self.pediatric_dataset_name = name,
        }
        self
    }

    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    #[must_use]
    pub const fn with_tier(mut self, tier: u8) -> Self {
        self.tier = tier;
        self
    }

    #[must_use]
    pub const fn with_flags(mut self, has_pediatric_er: bool, is_trauma_centre: bool) -> Self {
        self.has_pediatric_er = Some(has_pediatric_er);
        self.is_trauma_centre = Some(is_trauma_centre);
        self
    }
}

/// Which optional attribute columns the mapping table carried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttributeColumns {
    pub region: bool,
    pub tier: bool,
    pub has_pediatric_er: bool,
    pub is_trauma_centre: bool,
}

impl AttributeColumns {
    /// Every optional column present
    #[must_use]
    pub const fn all() -> Self {
        Self {
            region: true,
            tier: true,
            has_pediatric_er: true,
            is_trauma_centre: true,
        }
    }
}
