//! Tests for annotation classification and performance normalization.
mod common;
use common::*;
use schema_fuse::performance::UnmatchedFlags;
use schema_fuse::prelude::*;
use serde_json::{Value, json};

fn annotation(value: Value) -> Annotation {
    serde_json::from_value(value).expect("Failed to parse annotation")
}

fn annotations(pairs: &[(&str, Value)]) -> Vec<(String, Annotation)> {
    pairs
        .iter()
        .map(|(subject, raw)| (subject.to_string(), annotation(raw.clone())))
        .collect()
}

#[test]
fn test_annotation_precedence() {
    assert_eq!(annotation(json!({ "matched": true })), Annotation::Matched);
    assert_eq!(annotation(json!({ "blank": true })), Annotation::Blank);
    assert_eq!(
        annotation(json!({ "matched": true, "blank": true })),
        Annotation::Matched
    );
    assert_eq!(
        annotation(json!({ "blank": true, "unmatched": { "correction": true } })),
        Annotation::Blank
    );
    assert_eq!(
        annotation(json!({ "matched": false, "unmatched": { "correction": true } })),
        Annotation::Unmatched(UnmatchedFlags {
            correction: true,
            ..Default::default()
        })
    );
    assert_eq!(annotation(json!({ "matched": false })), Annotation::Inert);
    assert_eq!(annotation(json!({})), Annotation::Inert);
    assert_eq!(annotation(json!({ "note": "ignored" })), Annotation::Inert);
}

#[test]
fn test_flags_follow_truthiness() {
    assert_eq!(annotation(json!({ "matched": 1 })), Annotation::Matched);
    assert_eq!(annotation(json!({ "matched": "yes" })), Annotation::Matched);
    assert_eq!(annotation(json!({ "matched": 0, "blank": [1] })), Annotation::Blank);
    assert_eq!(annotation(json!({ "matched": "", "blank": null })), Annotation::Inert);

    let flags = annotation(json!({
        "unmatched": { "correction": 1, "questioned": "", "contradictions": {} }
    }))
    .flags();
    assert_eq!(flags.into_iter().collect::<Vec<_>>(), vec![Flag::Correction]);
}

#[test]
fn test_shadowed_keys_are_not_inspected() {
    assert_eq!(
        annotation(json!({ "blank": true, "unmatched": { "correction": "yes" } })),
        Annotation::Blank
    );
    assert_eq!(
        annotation(json!({ "blank": true, "unmatched": "not an object" })),
        Annotation::Blank
    );
    assert_eq!(
        annotation(json!({ "matched": true, "blank": "n/a", "unmatched": [1, 2] })),
        Annotation::Matched
    );
}

#[test]
fn test_winning_unmatched_must_be_an_object() {
    let result = serde_json::from_value::<Annotation>(json!({ "unmatched": "correction" }));
    assert!(result.is_err());
}

#[test]
fn test_dataset_with_shadowed_malformed_keys_loads() {
    let dataset = PerformanceDataset::from_value(
        json!({
            "age": {
                "performance": {
                    "p1": { "blank": true, "unmatched": { "correction": "yes" } },
                    "p2": { "matched": true, "blank": "n/a" },
                    "p3": { "matched": 1 }
                }
            }
        }),
        "inline",
    )
    .expect("Shadowed keys must not fail the load");

    let entry = dataset.iter().next().unwrap();
    let record = normalize(entry.performance.as_deref().unwrap(), &timestamp());
    assert_eq!(record.subject_ids().collect::<Vec<_>>(), vec!["p2", "p3"]);
    assert!(record.get("p3").unwrap().has(Flag::Match));
}

#[test]
fn test_missing_docs_renamed_to_missing_doc() {
    let flags = annotation(json!({ "unmatched": { "missing_docs": true } })).flags();
    assert_eq!(flags.into_iter().collect::<Vec<_>>(), vec![Flag::MissingDoc]);
    assert_eq!(Flag::MissingDoc.as_str(), "missing_doc");
}

#[test]
fn test_unmatched_maps_every_true_key() {
    let flags = annotation(json!({
        "unmatched": {
            "correction": true,
            "standardized": true,
            "filled_blank": true,
            "improved_comment": true,
            "missing_docs": true,
            "contradictions": true,
            "questioned": true,
            "unknown_key": true
        }
    }))
    .flags();

    assert_eq!(flags.len(), 7);
    assert!(!flags.contains(&Flag::Match));
}

#[test]
fn test_unmatched_ignores_false_and_null_keys() {
    let flags = annotation(json!({
        "unmatched": { "correction": false, "questioned": null, "standardized": true }
    }))
    .flags();
    assert_eq!(flags.into_iter().collect::<Vec<_>>(), vec![Flag::Standardized]);
}

#[test]
fn test_normalize_keeps_only_flagged_subjects() {
    let raw = annotations(&[
        ("p1", json!({ "matched": true })),
        ("p2", json!({ "blank": true })),
        ("p3", json!({ "unmatched": { "correction": true } })),
        ("p4", json!({ "unmatched": {} })),
        ("p5", json!({ "matched": false })),
    ]);

    let record = normalize(&raw, &timestamp());

    assert_eq!(record.subject_ids().collect::<Vec<_>>(), vec!["p1", "p3"]);
    assert!(record.get("p1").unwrap().has(Flag::Match));
    assert!(record.get("p3").unwrap().has(Flag::Correction));
    assert!(record.get("p2").is_none());
    assert!(record.get("p4").is_none());
}

#[test]
fn test_blank_wins_over_unmatched_in_record() {
    let raw = annotations(&[(
        "p1",
        json!({ "blank": true, "unmatched": { "correction": true, "missing_docs": true } }),
    )]);
    let record = normalize(&raw, &timestamp());
    assert!(record.is_empty());
}

#[test]
fn test_every_outcome_shares_batch_timestamp() {
    let raw = annotations(&[
        ("a", json!({ "matched": true })),
        ("b", json!({ "unmatched": { "questioned": true } })),
        ("c", json!({ "unmatched": { "filled_blank": true } })),
    ]);
    let record = normalize(&raw, &timestamp());

    assert_eq!(record.len(), 3);
    for (_, outcome) in record.iter() {
        assert_eq!(outcome.last_updated().as_str(), TIMESTAMP);
    }
}

#[test]
fn test_outcome_json_shape() {
    let raw = annotations(&[(
        "p1",
        json!({ "unmatched": { "questioned": true, "correction": true } }),
    )]);
    let record = normalize(&raw, &timestamp());

    let value = Value::from(&record);
    assert_eq!(
        value,
        json!({ "p1": { "correction": true, "questioned": true, "last_updated": TIMESTAMP } })
    );

    // Flags come out in vocabulary order, timestamp last.
    let keys: Vec<_> = value["p1"].as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["correction", "questioned", "last_updated"]);
}

#[test]
fn test_subject_outcome_requires_a_flag() {
    assert!(SubjectOutcome::new(Default::default(), timestamp()).is_none());
}
