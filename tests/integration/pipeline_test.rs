use triage_link::{
    FeaturePipeline, HospitalRegistry, MissingValueStrategy, PipelineInputs, PipelineStats,
};

use crate::utils::{
    MAPPING_CSV, bool_column, float_column, quiet_config, snapshot_object, string_column,
    write_file, write_snapshot_csv,
};

fn scenario_rows() -> [(&'static str, &'static str, &'static str); 3] {
    [
        ("2024-01-01T00:00:00", "St. X", "1 hr 30 min"),
        ("2024-01-01T01:00:00", "St. X", "Not available"),
        ("2024-01-01T02:00:00", "St. X", "2 hr 0 min"),
    ]
}

#[test]
fn test_end_to_end_snapshot_table() -> triage_link::Result<()> {
    let dir = tempfile::tempdir()?;
    let registry = HospitalRegistry::load(&write_file(dir.path(), "mapping.csv", MAPPING_CSV))?;
    let inputs = PipelineInputs {
        historical_dir: None,
        snapshot_table: Some(write_snapshot_csv(dir.path(), "current.csv", &scenario_rows())),
    };

    let output = FeaturePipeline::new(&registry, quiet_config()).run_from_inputs(&inputs)?;
    let batch = &output.dataset.batch;

    assert_eq!(batch.num_rows(), 3);
    assert_eq!(string_column(batch, "hospital_id"), vec![Some("1".to_string()); 3]);
    assert_eq!(
        float_column(batch, "wait_time_minutes"),
        vec![Some(90.0), None, Some(120.0)]
    );
    assert_eq!(
        bool_column(batch, "data_available"),
        vec![Some(true), Some(false), Some(true)]
    );

    // Closed window: at 02:00 the 1h window reaches back to 01:00, which has no value
    assert_eq!(
        float_column(batch, "wait_time_rolling_1h"),
        vec![Some(90.0), Some(90.0), Some(120.0)]
    );
    assert_eq!(float_column(batch, "wait_time_rolling_6h")[2], Some(105.0));
    assert_eq!(float_column(batch, "historical_mean"), vec![Some(105.0); 3]);
    assert_eq!(float_column(batch, "trend_1h"), vec![None, None, None]);

    assert_eq!(
        output.stats,
        PipelineStats {
            observations: 3,
            parsed: 2,
            unavailable: 1,
            resolved: 3,
            output_rows: 3,
            ..PipelineStats::default()
        }
    );
    Ok(())
}

#[test]
fn test_historical_and_snapshot_inputs_combine() -> triage_link::Result<()> {
    let dir = tempfile::tempdir()?;
    let history = dir.path().join("history");
    std::fs::create_dir(&history)?;
    write_file(
        &history,
        "2023-12-31.json",
        &format!(
            "{}{}",
            snapshot_object("2023-12-31T22:00:00", &[("St. X", "1 hr 0 min"), ("Unknown Clinic", "20 min")]),
            snapshot_object("2023-12-31T23:00:00", &[("St. X", "1 hr 20 min")]),
        ),
    );

    let registry = HospitalRegistry::load(&write_file(dir.path(), "mapping.csv", MAPPING_CSV))?;
    let inputs = PipelineInputs {
        historical_dir: Some(history),
        snapshot_table: Some(write_snapshot_csv(dir.path(), "current.csv", &scenario_rows())),
    };
    let output = FeaturePipeline::new(&registry, quiet_config()).run_from_inputs(&inputs)?;
    let batch = &output.dataset.batch;

    assert_eq!(batch.num_rows(), 6);
    assert_eq!(output.stats.files_read, 1);
    assert_eq!(output.stats.unresolved, 1);

    let ids = string_column(batch, "hospital_id");
    assert_eq!(ids[..5], vec![Some("1".to_string()); 5]);
    assert_eq!(ids[5], None);
    assert_eq!(
        string_column(batch, "hospital_name")[5].as_deref(),
        Some("Unknown Clinic")
    );

    // St. X in time order: 60, 80, 90, missing, 120
    let trend_3h = float_column(batch, "trend_3h");
    assert_eq!(trend_3h[3], None);
    assert_eq!(trend_3h[4], Some(40.0));
    Ok(())
}

#[test]
fn test_missing_strategies_end_to_end() -> triage_link::Result<()> {
    let dir = tempfile::tempdir()?;
    let registry = HospitalRegistry::load(&write_file(dir.path(), "mapping.csv", MAPPING_CSV))?;
    let inputs = PipelineInputs {
        historical_dir: None,
        snapshot_table: Some(write_snapshot_csv(dir.path(), "current.csv", &scenario_rows())),
    };

    let run = |strategy| {
        FeaturePipeline::new(&registry, quiet_config().with_missing_strategy(strategy))
            .run_from_inputs(&inputs)
    };

    let dropped = run(MissingValueStrategy::Drop)?;
    assert_eq!(dropped.dataset.batch.num_rows(), 2);
    assert_eq!(dropped.stats.rows_dropped, 1);

    let mean = run(MissingValueStrategy::Mean)?;
    assert_eq!(
        float_column(&mean.dataset.batch, "wait_time_minutes"),
        vec![Some(90.0), Some(105.0), Some(120.0)]
    );
    assert_eq!(
        bool_column(&mean.dataset.batch, "data_available")[1],
        Some(false)
    );

    let filled = run(MissingValueStrategy::ForwardFill)?;
    assert_eq!(
        float_column(&filled.dataset.batch, "wait_time_minutes"),
        vec![Some(90.0), Some(90.0), Some(120.0)]
    );
    assert_eq!(filled.stats.values_imputed, 1);
    Ok(())
}

#[test]
fn test_offset_timestamps_keep_local_hour_across_inputs() -> triage_link::Result<()> {
    let dir = tempfile::tempdir()?;
    let registry = HospitalRegistry::load(&write_file(dir.path(), "mapping.csv", MAPPING_CSV))?;

    let history = dir.path().join("history");
    std::fs::create_dir(&history)?;
    write_file(
        &history,
        "snapshots.json",
        &snapshot_object("2024-11-20T20:15:00-05:00", &[("St. X", "1 hr 0 min")]),
    );
    let table = write_snapshot_csv(
        dir.path(),
        "current.csv",
        &[("2024-11-20T21:15:00-05:00", "St. X", "1 hr 30 min")],
    );

    let inputs = PipelineInputs {
        historical_dir: Some(history),
        snapshot_table: Some(table),
    };
    let output = FeaturePipeline::new(&registry, quiet_config()).run_from_inputs(&inputs)?;
    let batch = &output.dataset.batch;

    assert_eq!(
        string_column(batch, "timestamp"),
        vec![
            Some("2024-11-20T20:15:00".to_string()),
            Some("2024-11-20T21:15:00".to_string()),
        ]
    );
    assert_eq!(
        bool_column(batch, "is_peak_hour"),
        vec![Some(true), Some(true)]
    );
    assert_eq!(float_column(batch, "trend_1h"), vec![None, Some(30.0)]);
    Ok(())
}
