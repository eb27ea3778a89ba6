use triage_link::loader::{HistoricalSeriesLoader, split_concatenated_objects};
use triage_link::{DataSource, Error};

use crate::utils::{at, snapshot_object, write_file};

#[test]
fn test_files_load_in_name_order() -> triage_link::Result<()> {
    let dir = tempfile::tempdir()?;
    let later = snapshot_object("2024-01-01T02:00:00", &[("St. X", "2 hr 0 min")]);
    let earlier = format!(
        "{}{}",
        snapshot_object("2024-01-01T00:00:00", &[("St. X", "1 hr 30 min")]),
        snapshot_object("2024-01-01T01:00:00", &[("St. X", "Not available")]),
    );
    write_file(dir.path(), "b_snapshots.json", &later);
    write_file(dir.path(), "a_snapshots.json", &earlier);
    write_file(dir.path(), "notes.txt", "not a snapshot");

    let load = HistoricalSeriesLoader::new(DataSource::Hlwiw).load(dir.path())?;
    assert_eq!(load.files_read, 2);
    assert_eq!(load.chunks_total, 3);
    assert_eq!(load.chunks_skipped, 0);

    let timestamps: Vec<_> = load.observations.iter().map(|o| o.timestamp).collect();
    assert_eq!(timestamps, vec![at(0, 0), at(1, 0), at(2, 0)]);
    assert_eq!(
        load.observations[1].wait_time_raw.as_deref(),
        Some("Not available")
    );
    Ok(())
}

#[test]
fn test_corrupt_objects_do_not_abort() -> triage_link::Result<()> {
    let dir = tempfile::tempdir()?;
    let content = format!(
        "{}{{\"timestamp\": \"2024-01-01T01:00:00\", \"data\": [1, 2]}}{{broken}}{}",
        snapshot_object("2024-01-01T00:00:00", &[("A", "1 hr 0 min"), ("B", "45 min")]),
        snapshot_object("2024-01-01T02:00:00", &[("A", "2 hr 0 min")]),
    );
    write_file(dir.path(), "feed.json", &content);

    let load = HistoricalSeriesLoader::new(DataSource::ErWatch).load(dir.path())?;
    assert_eq!(load.chunks_total, 4);
    assert_eq!(load.chunks_skipped, 2);
    assert_eq!(load.observations.len(), 3);
    assert!(load.observations.iter().all(|o| o.source == DataSource::ErWatch));
    Ok(())
}

#[test]
fn test_custom_extension() -> triage_link::Result<()> {
    let dir = tempfile::tempdir()?;
    write_file(
        dir.path(),
        "feed.txt",
        &snapshot_object("2024-01-01T00:00:00", &[("A", "10 min")]),
    );

    let default = HistoricalSeriesLoader::new(DataSource::Hlwiw).load(dir.path())?;
    assert!(default.observations.is_empty());

    let txt = HistoricalSeriesLoader::new(DataSource::Hlwiw)
        .with_extension("txt")
        .load(dir.path())?;
    assert_eq!(txt.observations.len(), 1);
    Ok(())
}

#[test]
fn test_missing_directory_is_fatal() {
    let result = HistoricalSeriesLoader::new(DataSource::Hlwiw)
        .load(std::path::Path::new("/no/such/snapshot/dir"));
    assert!(matches!(result, Err(Error::PathIo { .. })));
}

#[test]
fn test_split_tolerates_whitespace_between_objects() {
    let content = "{\"a\": 1}\n\n  {\"a\": 2}\r\n{\"a\": {\"b\": 3}}";
    assert_eq!(split_concatenated_objects(content).len(), 3);
}
