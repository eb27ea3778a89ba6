use std::path::Path;

use triage_link::{DataSource, Error, HospitalId, HospitalRegistry};

use crate::utils::{MAPPING_CSV, MINIMAL_MAPPING_CSV, write_file};

#[test]
fn test_load_mapping_csv() -> triage_link::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write_file(dir.path(), "mapping.csv", MAPPING_CSV);

    let registry = HospitalRegistry::load(&path)?;
    assert_eq!(registry.len(), 2);

    let attributes = registry.attribute_columns();
    assert!(attributes.region && attributes.tier);
    assert!(attributes.has_pediatric_er && attributes.is_trauma_centre);
    assert_eq!(registry.regions(), vec!["Calgary", "Edmonton"]);

    let y = registry.get(&HospitalId::from("2")).unwrap();
    assert_eq!(y.tier, 0);
    assert_eq!(y.is_trauma_centre, Some(true));
    assert_eq!(y.source_name(DataSource::Pediatric), Some("Y Peds"));

    let resolved = registry.resolve(Some("St. X"), DataSource::Hlwiw);
    assert_eq!(resolved.hospital_id, Some(HospitalId::from("1")));
    assert_eq!(resolved.canonical_name.as_deref(), Some("Saint X Hospital"));

    let er_watch = registry.resolve(Some("Y General"), DataSource::ErWatch);
    assert_eq!(er_watch.hospital_id, Some(HospitalId::from("2")));
    Ok(())
}

#[test]
fn test_optional_columns_absent() -> triage_link::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write_file(dir.path(), "mapping.csv", MINIMAL_MAPPING_CSV);

    let registry = HospitalRegistry::load(&path)?;
    let attributes = registry.attribute_columns();
    assert!(!attributes.region && !attributes.tier);
    assert!(registry.regions().is_empty());
    Ok(())
}

#[test]
fn test_unknown_name_passes_through() -> triage_link::Result<()> {
    let dir = tempfile::tempdir()?;
    let registry = HospitalRegistry::load(&write_file(dir.path(), "m.csv", MAPPING_CSV))?;

    let first = registry.resolve(Some("Unknown Clinic"), DataSource::Hlwiw);
    let second = registry.resolve(Some("Unknown Clinic"), DataSource::Hlwiw);
    assert_eq!(first, second);
    assert_eq!(first.hospital_id, None);
    assert_eq!(first.canonical_name.as_deref(), Some("Unknown Clinic"));
    Ok(())
}

#[test]
fn test_load_bearing_defects_fail() {
    let dir = tempfile::tempdir().unwrap();

    let missing = HospitalRegistry::load(Path::new("/no/such/mapping.csv"));
    assert!(matches!(missing, Err(Error::PathIo { .. })));

    let duplicate = write_file(
        dir.path(),
        "dup.csv",
        "hospital_id,standard_name,er_watch_name,hlwiw_name,pediatric_dataset_name\n\
         1,A,a,a,a\n\
         1,B,b,b,b\n",
    );
    assert!(matches!(
        HospitalRegistry::load(&duplicate),
        Err(Error::DuplicateHospitalId(_))
    ));

    let no_name = write_file(
        dir.path(),
        "no_name.csv",
        "hospital_id,standard_name,er_watch_name,hlwiw_name,pediatric_dataset_name\n\
         1,A,a,a,a\n\
         2,,b,b,b\n",
    );
    assert!(matches!(
        HospitalRegistry::load(&no_name),
        Err(Error::MalformedMapping { row: 2, .. })
    ));

    let no_column = write_file(dir.path(), "no_column.csv", "hospital_id,standard_name\n1,A\n");
    assert!(matches!(
        HospitalRegistry::load(&no_column),
        Err(Error::ColumnNotFound { .. })
    ));

    let unsupported = write_file(dir.path(), "mapping.xlsx", "");
    assert!(matches!(
        HospitalRegistry::load(&unsupported),
        Err(Error::UnsupportedFormat(_))
    ));
}
