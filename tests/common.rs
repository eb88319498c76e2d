//! Common test utilities for building schemas, datasets and input files.
use schema_fuse::prelude::*;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};

pub const TIMESTAMP: &str = "2025-03-14T09:26:53.589793Z";

#[allow(dead_code)]
pub fn timestamp() -> BatchTimestamp {
    BatchTimestamp::from(TIMESTAMP)
}

/// A wrapped definition schema with two variables and an extra top-level key.
///
/// `age` has an enumerated group, `sex` has options.
#[allow(dead_code)]
pub fn create_definitions() -> Value {
    json!({
        "title": "Study variables",
        "properties": {
            "age": {
                "anyOf": [{ "type": "number" }, { "type": "null" }],
                "default": null,
                "description": "Age at diagnosis, in years",
                "group_id": "demographics",
                "notes": ""
            },
            "sex": {
                "anyOf": [{ "type": "string" }, { "type": "null" }],
                "default": null,
                "description": "Biological sex",
                "group_id": "demographics",
                "notes": "Ñ and ü must survive untouched",
                "options": ["female", "male"]
            }
        },
        "version": 3
    })
}

/// A performance dataset touching `age` and `sex` plus two unknown variables,
/// one of which has no `performance` object at all.
#[allow(dead_code)]
pub fn create_performance() -> Value {
    json!({
        "age": {
            "performance": {
                "p1": { "matched": true },
                "p2": { "blank": true },
                "p3": { "unmatched": { "correction": true, "missing_docs": true } }
            }
        },
        "weight": {
            "performance": {
                "p1": { "unmatched": { "missing_docs": true } },
                "p2": { "matched": true }
            }
        },
        "sex": {
            "performance": {
                "p2": { "unmatched": { "questioned": true } }
            }
        },
        "bmi": {
            "source": "no performance recorded"
        }
    })
}

#[allow(dead_code)]
pub fn load_document(value: Value) -> SchemaDocument {
    SchemaDocument::from_value(value, "test").expect("Failed to load definitions")
}

#[allow(dead_code)]
pub fn load_dataset(value: Value) -> PerformanceDataset {
    PerformanceDataset::from_value(value, "test").expect("Failed to load dataset")
}

/// Writes `value` as pretty JSON to `dir/name` and returns the path.
#[allow(dead_code)]
pub fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

/// A config whose four paths all live under `dir`.
#[allow(dead_code)]
pub fn config_in(dir: &Path) -> FusionConfig {
    FusionConfig {
        definitions_path: dir.join("definitions.json"),
        performance_path: dir.join("performance.json"),
        output_path: dir.join("fused.json"),
        missing_report_path: dir.join("missing_variables.txt"),
    }
}
