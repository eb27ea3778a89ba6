use chrono::{NaiveDate, NaiveDateTime};
use triage_link::loader::{HistoricalSeriesLoader, load_snapshot_table};
use triage_link::{DataSource, Error};

use crate::utils::{at, snapshot_object, write_file, write_snapshot_csv};

fn evening_of_nov_20() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 11, 20)
        .unwrap()
        .and_hms_opt(21, 15, 0)
        .unwrap()
}

#[test]
fn test_load_snapshot_csv() -> triage_link::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write_snapshot_csv(
        dir.path(),
        "current.csv",
        &[
            ("2024-01-01T00:00:00", "St. X", "1 hr 30 min"),
            ("2024-01-01T01:00:00", "St. X", "Not available"),
        ],
    );

    let rows = load_snapshot_table(&path, DataSource::Hlwiw)?;
    assert_eq!(rows.rows_read, 2);
    assert_eq!(rows.observations.len(), 2);
    assert_eq!(rows.observations[0].timestamp, at(0, 0));
    assert_eq!(rows.observations[0].hospital_raw_name, "St. X");
    assert_eq!(rows.observations[1].wait_time_raw.as_deref(), Some("Not available"));
    Ok(())
}

#[test]
fn test_missing_required_column() -> triage_link::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write_file(
        dir.path(),
        "current.csv",
        "Timestamp,Hospital Name\n2024-01-01T00:00:00,St. X\n",
    );

    let result = load_snapshot_table(&path, DataSource::Hlwiw);
    assert!(matches!(result, Err(Error::ColumnNotFound { column, .. }) if column == "Wait Time"));
    Ok(())
}

#[test]
fn test_offset_timestamp_matches_json_snapshot() -> triage_link::Result<()> {
    let dir = tempfile::tempdir()?;
    let written = "2024-11-20T21:15:00-05:00";
    let table = write_snapshot_csv(dir.path(), "current.csv", &[(written, "St. X", "1 hr 0 min")]);

    let json_dir = dir.path().join("history");
    std::fs::create_dir(&json_dir)?;
    write_file(
        &json_dir,
        "snapshots.json",
        &snapshot_object(written, &[("St. X", "1 hr 0 min")]),
    );

    let from_table = load_snapshot_table(&table, DataSource::Hlwiw)?;
    let from_json = HistoricalSeriesLoader::new(DataSource::Hlwiw).load(&json_dir)?;

    assert_eq!(from_table.observations[0].timestamp, evening_of_nov_20());
    assert_eq!(
        from_table.observations[0].timestamp,
        from_json.observations[0].timestamp
    );
    Ok(())
}

#[test]
fn test_us_date_layout_in_csv() -> triage_link::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = write_snapshot_csv(
        dir.path(),
        "current.csv",
        &[
            ("11/20/2024 21:15", "St. X", "45 min"),
            ("2024-11-20 21:15:00", "Y Gen", "50 min"),
        ],
    );

    let rows = load_snapshot_table(&path, DataSource::Hlwiw)?;
    assert_eq!(rows.observations.len(), 2);
    assert_eq!(rows.observations[0].timestamp, evening_of_nov_20());
    assert_eq!(rows.observations[1].timestamp, evening_of_nov_20());
    Ok(())
}
