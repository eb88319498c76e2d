//! Integration tests for schema-fuse
//!
//! End-to-end runs of `FusionJob` against files on disk.
//!
mod common;
use common::*;
use schema_fuse::prelude::*;
use serde_json::{Value, json};
use std::fs;

fn read_output(path: &std::path::Path) -> (String, Value) {
    let text = fs::read_to_string(path).expect("Fused schema was not written");
    let value = serde_json::from_str(&text).expect("Fused schema is not valid JSON");
    (text, value)
}

#[test]
fn test_full_run_writes_fused_schema_and_report() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    write_json(dir.path(), "definitions.json", &create_definitions());
    write_json(dir.path(), "performance.json", &create_performance());

    let outcome = FusionJob::builder(config.clone())
        .with_timestamp(timestamp())
        .build()
        .run()
        .expect("Fusion run failed");

    assert_eq!(outcome.result.fused_count, 2);
    assert_eq!(outcome.result.created_count, 2);
    assert_eq!(outcome.timestamp.as_str(), TIMESTAMP);
    assert_eq!(
        outcome.report,
        ReportStatus::Written(config.missing_report_path.clone())
    );

    let (text, fused) = read_output(&config.output_path);
    assert_eq!(fused["title"], json!("Study variables"));
    assert_eq!(
        fused["properties"]["weight"]["performance"]["p2"],
        json!({ "match": true, "last_updated": TIMESTAMP })
    );
    assert_eq!(fused["properties"]["bmi"]["group_id"], json!("unknown"));
    assert!(fused["properties"]["bmi"].get("performance").is_none());

    // Two-space indentation, non-ASCII written literally.
    assert!(text.starts_with("{\n  \"title\""));
    assert!(text.contains("Ñ and ü must survive untouched"));

    let report = fs::read_to_string(&config.missing_report_path).unwrap();
    assert!(report.starts_with("Missing Variables Report\n"));
    assert!(report.contains("Total missing variables: 2\n"));
}

#[test]
fn test_run_without_placeholders_skips_report() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    write_json(dir.path(), "definitions.json", &json!({ "age": {} }));
    write_json(
        dir.path(),
        "performance.json",
        &json!({ "age": { "performance": { "p1": { "matched": true } } } }),
    );

    let outcome = FusionJob::builder(config.clone()).build().run().unwrap();

    assert_eq!(outcome.report, ReportStatus::NotNeeded);
    assert!(!config.missing_report_path.exists());
    let (_, fused) = read_output(&config.output_path);
    assert_eq!(
        fused,
        json!({
            "properties": {
                "age": {
                    "performance": {
                        "p1": { "match": true, "last_updated": outcome.timestamp.as_str() }
                    }
                }
            }
        })
    );
}

#[test]
fn test_missing_input_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    write_json(dir.path(), "performance.json", &create_performance());

    let result = FusionJob::builder(config.clone()).build().run();

    match result {
        Err(FusionError::NotFound { path }) => assert!(path.ends_with("definitions.json")),
        other => panic!("Expected NotFound, got {other:?}"),
    }
    assert!(!config.output_path.exists());
}

#[test]
fn test_missing_dataset_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    write_json(dir.path(), "definitions.json", &create_definitions());

    let result = FusionJob::builder(config.clone()).build().run();

    assert!(matches!(result, Err(FusionError::NotFound { .. })));
    assert!(!config.output_path.exists());
}

#[test]
fn test_invalid_json_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    write_json(dir.path(), "definitions.json", &create_definitions());
    fs::write(&config.performance_path, "{ \"age\": ").unwrap();

    let result = FusionJob::builder(config.clone()).build().run();

    assert!(matches!(result, Err(FusionError::Parse { .. })));
    assert!(!config.output_path.exists());
}

#[test]
fn test_unwritable_output_is_write_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path());
    write_json(dir.path(), "definitions.json", &create_definitions());
    write_json(dir.path(), "performance.json", &create_performance());

    // The output's parent "directory" is a regular file.
    let not_a_dir = dir.path().join("not_a_dir");
    fs::write(&not_a_dir, "").unwrap();
    config.output_path = not_a_dir.join("fused.json");

    let result = FusionJob::builder(config.clone()).build().run();

    assert!(matches!(result, Err(FusionError::Write { .. })));
    assert!(!config.missing_report_path.exists());
}

#[test]
fn test_report_failure_does_not_fail_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path());
    write_json(dir.path(), "definitions.json", &create_definitions());
    write_json(dir.path(), "performance.json", &create_performance());

    let not_a_dir = dir.path().join("not_a_dir");
    fs::write(&not_a_dir, "").unwrap();
    config.missing_report_path = not_a_dir.join("missing_variables.txt");

    let outcome = FusionJob::builder(config.clone())
        .build()
        .run()
        .expect("Report failure must not fail the run");

    assert!(matches!(outcome.report, ReportStatus::Failed(ReportError::Write { .. })));
    assert!(config.output_path.exists());
}

#[test]
fn test_rerun_overwrites_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    write_json(dir.path(), "definitions.json", &create_definitions());
    write_json(dir.path(), "performance.json", &create_performance());
    fs::write(&config.output_path, "stale content that is much longer than needed").unwrap();

    FusionJob::builder(config.clone()).build().run().unwrap();

    let (_, fused) = read_output(&config.output_path);
    assert_eq!(fused["properties"].as_object().unwrap().len(), 4);
    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().contains(".tmp."))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_default_config_uses_fixed_paths() {
    let config = FusionConfig::default();
    assert_eq!(
        config.definitions_path.to_str(),
        Some("schema_main_variables_to_be_fused.json")
    );
    assert_eq!(
        config.performance_path.to_str(),
        Some("schema_performances_to_be_fused.json")
    );
    assert_eq!(config.output_path.to_str(), Some("schema_v01_fused.json"));
    assert_eq!(
        config.missing_report_path.to_str(),
        Some("missing_variables.txt")
    );
}
