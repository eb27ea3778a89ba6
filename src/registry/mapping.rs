//! Conversion of hospital mapping table batches into identities

use arrow::record_batch::RecordBatch;

use crate::error::{Error, Result};
use crate::models::{AttributeColumns, DataSource, HospitalIdentity};
use crate::utils::arrow::{extract_booleans, extract_int64s, extract_strings};

/// Table name used in error messages
pub const MAPPING_TABLE: &str = "hospital mapping table";

pub const ID_COLUMN: &str = "hospital_id";
pub const STANDARD_NAME_COLUMN: &str = "standard_name";
pub const REGION_COLUMN: &str = "region";
pub const TIER_COLUMN: &str = "tier";
pub const PEDIATRIC_ER_COLUMN: &str = "has_pediatric_er";
pub const TRAUMA_COLUMN: &str = "is_trauma_centre";

/// Identities read from one batch, plus which optional columns the batch had
#[derive(Debug)]
pub struct MappingRows {
    pub identities: Vec<HospitalIdentity>,
    pub attributes: AttributeColumns,
}

/// Convert one batch of the mapping table
///
/// `first_row` is the 1-based row number of the batch's first row within the whole
/// table, so errors point at the right line. A null id or standard name is fatal;
/// a null tier counts as 0.
pub fn identities_from_batch(batch: &RecordBatch, first_row: usize) -> Result<MappingRows> {
    let ids = required_strings(batch, ID_COLUMN)?;
    let names = required_strings(batch, STANDARD_NAME_COLUMN)?;
    let source_names = [
        required_strings(batch, DataSource::ErWatch.mapping_column())?,
        required_strings(batch, DataSource::Hlwiw.mapping_column())?,
        required_strings(batch, DataSource::Pediatric.mapping_column())?,
    ];

    let regions = extract_strings(batch, REGION_COLUMN, MAPPING_TABLE, false)?;
    let tiers = extract_int64s(batch, TIER_COLUMN, MAPPING_TABLE, false)?;
    let pediatric_er = extract_booleans(batch, PEDIATRIC_ER_COLUMN, MAPPING_TABLE, false)?;
    let trauma = extract_booleans(batch, TRAUMA_COLUMN, MAPPING_TABLE, false)?;

    let attributes = AttributeColumns {
        region: regions.is_some(),
        tier: tiers.is_some(),
        has_pediatric_er: pediatric_er.is_some(),
        is_trauma_centre: trauma.is_some(),
    };

    let mut identities = Vec::with_capacity(batch.num_rows());
    for idx in 0..batch.num_rows() {
        let row = first_row + idx;
        let id = ids[idx]
            .clone()
            .ok_or_else(|| malformed(row, "hospital_id is empty"))?;
        let name = names[idx]
            .clone()
            .ok_or_else(|| malformed(row, "standard_name is empty"))?;

        let mut identity = HospitalIdentity::new(id, name);
        for (source, column) in DataSource::ALL.into_iter().zip(&source_names) {
            if let Some(source_name) = &column[idx] {
                identity = identity.with_source_name(source, source_name.clone());
            }
        }

        identity.region = regions.as_ref().and_then(|values| values[idx].clone());
        identity.tier = match tiers.as_ref().and_then(|values| values[idx]) {
            None => 0,
            Some(tier) => u8::try_from(tier)
                .map_err(|_| malformed(row, &format!("tier {tier} is out of range")))?,
        };
        identity.has_pediatric_er = pediatric_er.as_ref().and_then(|values| values[idx]);
        identity.is_trauma_centre = trauma.as_ref().and_then(|values| values[idx]);

        identities.push(identity);
    }

    Ok(MappingRows {
        identities,
        attributes,
    })
}

fn required_strings(batch: &RecordBatch, column: &str) -> Result<Vec<Option<String>>> {
    extract_strings(batch, column, MAPPING_TABLE, true)?
        .ok_or_else(|| Error::column_not_found(column, MAPPING_TABLE))
}

fn malformed(row: usize, reason: &str) -> Error {
    Error::MalformedMapping {
        row,
        reason: reason.to_string(),
    }
}
