use triage_link::utils::io::read_table;
use triage_link::{FeaturePipeline, HospitalRegistry, PipelineInputs};

use crate::utils::{MAPPING_CSV, column_names, quiet_config, write_file, write_snapshot_csv};

fn run_pipeline(dir: &std::path::Path) -> triage_link::Result<triage_link::PipelineOutput> {
    let registry = HospitalRegistry::load(&write_file(dir, "mapping.csv", MAPPING_CSV))?;
    let inputs = PipelineInputs {
        historical_dir: None,
        snapshot_table: Some(write_snapshot_csv(
            dir,
            "current.csv",
            &[
                ("2024-01-01T00:00:00", "St. X", "1 hr 30 min"),
                ("2024-01-01T00:30:00", "Y Gen", "45 min"),
                ("2024-01-01T01:00:00", "Unknown Clinic", "Not available"),
            ],
        )),
    };
    FeaturePipeline::new(&registry, quiet_config()).run_from_inputs(&inputs)
}

#[test]
fn test_write_and_read_back_parquet() -> triage_link::Result<()> {
    let dir = tempfile::tempdir()?;
    let output = run_pipeline(dir.path())?;
    let path = dir.path().join("features.parquet");
    triage_link::pipeline::write_output(&path, &output)?;

    let batches = read_table(&path, "feature table")?;
    let rows: usize = batches.iter().map(|b| b.num_rows()).sum();
    assert_eq!(rows, 3);
    assert_eq!(column_names(&batches[0]), column_names(&output.dataset.batch));
    Ok(())
}

#[test]
fn test_write_csv_with_header() -> triage_link::Result<()> {
    let dir = tempfile::tempdir()?;
    let output = run_pipeline(dir.path())?;
    let path = dir.path().join("features.csv");
    triage_link::pipeline::write_output(&path, &output)?;

    let content = std::fs::read_to_string(&path)?;
    let mut lines = content.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("timestamp,hospital_id,hospital_name,source,region"));
    assert_eq!(lines.count(), 3);
    assert!(content.contains("2024-01-01T00:30:00,2,Y General Hospital,hlwiw,Edmonton"));
    Ok(())
}
