use triage_link::algorithm::MasterDatasetAssembler;
use triage_link::models::AttributeColumns;
use triage_link::{
    DataSource, EnrichedRecord, HospitalIdentity, HospitalRegistry, Observation, PipelineConfig,
    RollingAndTrendEngine, TemporalFeatureDeriver, parse,
};

use crate::utils::{at, bool_column, column_names, string_column};

fn registry(attributes: AttributeColumns) -> HospitalRegistry {
    HospitalRegistry::from_identities(
        vec![
            HospitalIdentity::new("1", "Saint X Hospital")
                .with_source_name(DataSource::Hlwiw, "St. X")
                .with_region("Calgary")
                .with_tier(2)
                .with_flags(true, false),
            HospitalIdentity::new("2", "Y General Hospital")
                .with_source_name(DataSource::Hlwiw, "Y Gen")
                .with_region("Edmonton"),
        ],
        attributes,
    )
    .unwrap()
}

fn records(registry: &HospitalRegistry, config: &PipelineConfig) -> Vec<EnrichedRecord> {
    let observations = [
        ("St. X", 0, "1 hr 0 min"),
        ("Unknown Clinic", 0, "30 min"),
        ("Y Gen", 1, "Not available"),
    ];
    let records = observations
        .into_iter()
        .map(|(name, hour, wait)| {
            let observation =
                Observation::new(at(hour, 0), name, DataSource::Hlwiw, Some(wait.to_string()));
            let resolution = registry.resolve(Some(name), DataSource::Hlwiw);
            let wait_time = parse::parse(Some(wait));
            EnrichedRecord::new(observation, resolution, wait_time)
        })
        .collect();
    let records = RollingAndTrendEngine::new(config).apply(records);
    TemporalFeatureDeriver::apply(records)
}

#[test]
fn test_full_column_order() {
    let registry = registry(AttributeColumns::all());
    let config = PipelineConfig::new()
        .without_progress()
        .with_rolling_windows(vec![1, 24])
        .with_region_encoding(true);
    let assembler = MasterDatasetAssembler::new(&registry, &config);
    let dataset = assembler.assemble(records(&registry, &config)).unwrap();

    let expected = [
        "timestamp",
        "hospital_id",
        "hospital_name",
        "source",
        "region",
        "tier",
        "has_pediatric_er",
        "is_trauma_centre",
        "wait_time_raw",
        "wait_time_minutes",
        "data_available",
        "wait_time_rolling_1h",
        "wait_time_rolling_24h",
        "trend_1h",
        "trend_3h",
        "trend_direction",
        "volatility_6h",
        "historical_mean",
        "historical_median",
        "historical_std",
        "historical_min",
        "historical_max",
        "historical_25th",
        "historical_75th",
        "wait_time_vs_avg",
        "wait_time_pct_of_max",
        "is_above_75th_percentile",
        "is_below_25th_percentile",
        "hour_of_day",
        "day_of_week",
        "day_name",
        "day_of_month",
        "week_of_year",
        "month",
        "year",
        "is_weekend",
        "is_weekday",
        "time_of_day",
        "is_peak_hour",
        "is_off_peak",
        "is_business_hours",
        "is_night_shift",
        "region_Calgary",
        "region_Edmonton",
    ];
    assert_eq!(column_names(&dataset.batch), expected);
    assert_eq!(assembler.columns().len(), expected.len());
}

#[test]
fn test_absent_attributes_are_omitted() {
    let registry = registry(AttributeColumns::default());
    let config = PipelineConfig::new().without_progress().with_region_encoding(true);
    let dataset = MasterDatasetAssembler::new(&registry, &config)
        .assemble(records(&registry, &config))
        .unwrap();

    let names = column_names(&dataset.batch);
    for absent in ["region", "tier", "has_pediatric_er", "is_trauma_centre"] {
        assert!(!names.iter().any(|n| n == absent), "{absent} should be omitted");
    }
    assert!(!names.iter().any(|n| n.starts_with("region_")));
}

#[test]
fn test_left_join_keeps_unresolved() {
    let registry = registry(AttributeColumns::all());
    let config = PipelineConfig::new().without_progress().with_region_encoding(true);
    let dataset = MasterDatasetAssembler::new(&registry, &config)
        .assemble(records(&registry, &config))
        .unwrap();
    let batch = &dataset.batch;

    assert_eq!(batch.num_rows(), 3);
    assert_eq!(
        string_column(batch, "hospital_id"),
        vec![Some("1".to_string()), Some("2".to_string()), None]
    );
    assert_eq!(
        string_column(batch, "hospital_name"),
        vec![
            Some("Saint X Hospital".to_string()),
            Some("Y General Hospital".to_string()),
            Some("Unknown Clinic".to_string()),
        ]
    );
    assert_eq!(
        string_column(batch, "region"),
        vec![Some("Calgary".to_string()), Some("Edmonton".to_string()), None]
    );
    assert_eq!(
        bool_column(batch, "region_Calgary"),
        vec![Some(true), Some(false), Some(false)]
    );
    assert_eq!(
        bool_column(batch, "data_available"),
        vec![Some(true), Some(false), Some(true)]
    );
    assert_eq!(
        string_column(batch, "time_of_day"),
        vec![Some("night".to_string()); 3]
    );
}
