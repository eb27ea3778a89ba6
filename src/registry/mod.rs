//! Hospital identity registry
//!
//! The mapping table is loaded once per run and is the only source of canonical ids
//! and hospital attributes. Lookups are pure reads.

pub mod mapping;

use std::path::Path;

use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::models::{AttributeColumns, DataSource, HospitalId, HospitalIdentity, Resolution};
use crate::utils::io::read_table;
use crate::utils::logging::log_operation_complete;

/// Canonical hospital identities with one name index per data source
#[derive(Debug, Clone)]
pub struct HospitalRegistry {
    hospitals: Vec<HospitalIdentity>,
    by_id: FxHashMap<HospitalId, usize>,
    by_source_name: [FxHashMap<String, usize>; 3],
    attributes: AttributeColumns,
}

impl HospitalRegistry {
    /// Load the mapping table from a CSV or Parquet file
    ///
    /// Any defect in the table fails the load: a missing file or column, a row with
    /// no id or standard name, a duplicated id, or a table without rows.
    pub fn load(path: &Path) -> Result<Self> {
        let batches = read_table(path, "hospital mapping")?;
        let registry = Self::from_batches(&batches, path)?;
        log_operation_complete("loaded", path, registry.len(), None);
        Ok(registry)
    }

    /// Build the registry from mapping table batches read from `path`
    pub fn from_batches(batches: &[RecordBatch], path: &Path) -> Result<Self> {
        let mut identities = Vec::new();
        let mut attributes = AttributeColumns::all();
        let mut next_row = 1;

        for batch in batches {
            let rows = mapping::identities_from_batch(batch, next_row)?;
            next_row += batch.num_rows();
            attributes.region &= rows.attributes.region;
            attributes.tier &= rows.attributes.tier;
            attributes.has_pediatric_er &= rows.attributes.has_pediatric_er;
            attributes.is_trauma_centre &= rows.attributes.is_trauma_centre;
            identities.extend(rows.identities);
        }

        if identities.is_empty() {
            return Err(Error::EmptyMapping(path.to_path_buf()));
        }

        Self::from_identities(identities, attributes)
    }

    /// Build the registry from identities already in memory
    ///
    /// When two identities share a source spelling, the first one keeps it.
    pub fn from_identities(
        hospitals: Vec<HospitalIdentity>,
        attributes: AttributeColumns,
    ) -> Result<Self> {
        let mut by_id = FxHashMap::default();
        let mut by_source_name: [FxHashMap<String, usize>; 3] = Default::default();

        for (idx, hospital) in hospitals.iter().enumerate() {
            if by_id.insert(hospital.hospital_id.clone(), idx).is_some() {
                return Err(Error::DuplicateHospitalId(hospital.hospital_id.to_string()));
            }
            for source in DataSource::ALL {
                if let Some(name) = hospital.source_name(source) {
                    by_source_name[source.index()]
                        .entry(name.to_string())
                        .or_insert(idx);
                }
            }
        }

        Ok(Self {
            hospitals,
            by_id,
            by_source_name,
            attributes,
        })
    }

    /// Resolve a raw name as spelled by `source`
    ///
    /// A null name resolves to nothing. An unknown name keeps the raw spelling as
    /// its name so the record can still be reported as unmapped.
    #[must_use]
    pub fn resolve(&self, raw_name: Option<&str>, source: DataSource) -> Resolution {
        let Some(raw_name) = raw_name else {
            return Resolution::default();
        };

        match self.by_source_name[source.index()].get(raw_name) {
            Some(&idx) => {
                let hospital = &self.hospitals[idx];
                Resolution {
                    hospital_id: Some(hospital.hospital_id.clone()),
                    canonical_name: Some(hospital.standard_name.clone()),
                }
            }
            None => Resolution {
                hospital_id: None,
                canonical_name: Some(raw_name.to_string()),
            },
        }
    }

    /// Look up an identity by canonical id
    #[must_use]
    pub fn get(&self, hospital_id: &HospitalId) -> Option<&HospitalIdentity> {
        self.by_id.get(hospital_id).map(|&idx| &self.hospitals[idx])
    }

    /// Optional attribute columns present in the mapping table
    #[must_use]
    pub const fn attribute_columns(&self) -> AttributeColumns {
        self.attributes
    }

    /// Distinct regions, sorted
    #[must_use]
    pub fn regions(&self) -> Vec<&str> {
        self.hospitals
            .iter()
            .filter_map(|hospital| hospital.region.as_deref())
            .unique()
            .sorted()
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HospitalIdentity> {
        self.hospitals.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hospitals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hospitals.is_empty()
    }
}
