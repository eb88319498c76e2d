use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;

/// Key of the timestamp stored next to the flags of a subject outcome.
pub const LAST_UPDATED_KEY: &str = "last_updated";

/// One category of evaluation outcome.
///
/// The declaration order is the order flags are written out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Flag {
    Match,
    Correction,
    Standardized,
    FilledBlank,
    ImprovedComment,
    MissingDoc,
    Contradictions,
    Questioned,
}

impl Flag {
    pub const ALL: [Flag; 8] = [
        Flag::Match,
        Flag::Correction,
        Flag::Standardized,
        Flag::FilledBlank,
        Flag::ImprovedComment,
        Flag::MissingDoc,
        Flag::Contradictions,
        Flag::Questioned,
    ];

    /// The key used for this flag in the fused schema.
    pub fn as_str(&self) -> &'static str {
        match self {
            Flag::Match => "match",
            Flag::Correction => "correction",
            Flag::Standardized => "standardized",
            Flag::FilledBlank => "filled_blank",
            Flag::ImprovedComment => "improved_comment",
            Flag::MissingDoc => "missing_doc",
            Flag::Contradictions => "contradictions",
            Flag::Questioned => "questioned",
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The timestamp stamped onto every outcome produced by one fusion run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BatchTimestamp(String);

impl BatchTimestamp {
    /// The current UTC time in RFC 3339 form, e.g. `2025-01-31T09:15:02.118734Z`.
    pub fn now() -> Self {
        Self(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BatchTimestamp {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for BatchTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The normalized outcome for one subject: a non-empty flag set plus the
/// batch timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectOutcome {
    flags: BTreeSet<Flag>,
    last_updated: BatchTimestamp,
}

impl SubjectOutcome {
    /// Returns `None` when `flags` is empty; such a subject has nothing to record.
    pub fn new(flags: BTreeSet<Flag>, last_updated: BatchTimestamp) -> Option<Self> {
        if flags.is_empty() {
            None
        } else {
            Some(Self {
                flags,
                last_updated,
            })
        }
    }

    pub fn flags(&self) -> &BTreeSet<Flag> {
        &self.flags
    }

    pub fn has(&self, flag: Flag) -> bool {
        self.flags.contains(&flag)
    }

    pub fn last_updated(&self) -> &BatchTimestamp {
        &self.last_updated
    }
}

impl From<&SubjectOutcome> for Value {
    fn from(outcome: &SubjectOutcome) -> Self {
        let mut object: Map<String, Value> = outcome
            .flags
            .iter()
            .map(|flag| (flag.as_str().to_string(), Value::Bool(true)))
            .collect();
        object.insert(
            LAST_UPDATED_KEY.to_string(),
            Value::String(outcome.last_updated.0.clone()),
        );
        Value::Object(object)
    }
}

/// Subject ID → outcome, in dataset order. Only subjects with at least one
/// flag are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerformanceRecord {
    subjects: Vec<(String, SubjectOutcome)>,
}

impl PerformanceRecord {
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn get(&self, subject: &str) -> Option<&SubjectOutcome> {
        self.subjects
            .iter()
            .find(|(id, _)| id == subject)
            .map(|(_, outcome)| outcome)
    }

    pub fn subject_ids(&self) -> impl Iterator<Item = &str> {
        self.subjects.iter().map(|(id, _)| id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SubjectOutcome)> {
        self.subjects
            .iter()
            .map(|(id, outcome)| (id.as_str(), outcome))
    }
}

impl FromIterator<(String, SubjectOutcome)> for PerformanceRecord {
    fn from_iter<I: IntoIterator<Item = (String, SubjectOutcome)>>(iter: I) -> Self {
        Self {
            subjects: iter.into_iter().collect(),
        }
    }
}

impl From<&PerformanceRecord> for Value {
    fn from(record: &PerformanceRecord) -> Self {
        Value::Object(
            record
                .subjects
                .iter()
                .map(|(id, outcome)| (id.clone(), Value::from(outcome)))
                .collect(),
        )
    }
}
