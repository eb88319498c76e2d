use super::annotation::Annotation;
use crate::error::FusionError;
use crate::schema::PERFORMANCE_KEY;
use crate::schema::loader::{kind_of, read_json, shape_error};
use serde_json::Value;
use std::path::Path;
use tracing::info;

/// Subject ID → annotation, in dataset order.
pub type SubjectAnnotations = Vec<(String, Annotation)>;

/// One variable of a performance dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetEntry {
    pub name: String,
    /// `None` when the entry has no `performance` object (or it is `null`).
    pub performance: Option<SubjectAnnotations>,
}

/// A performance dataset: variable name → per-subject annotations, in the
/// order the variables appear in the source document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerformanceDataset {
    entries: Vec<DatasetEntry>,
}

impl PerformanceDataset {
    /// Loads a performance dataset from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FusionError> {
        let path = path.as_ref();
        let dataset = Self::from_value(read_json(path)?, &path.display().to_string())?;
        info!(
            path = %path.display(),
            variables = dataset.len(),
            "loaded performance dataset"
        );
        Ok(dataset)
    }

    /// Validates and types a parsed dataset. `origin` names the source in errors.
    pub fn from_value(value: Value, origin: &str) -> Result<Self, FusionError> {
        let root = match value {
            Value::Object(root) => root,
            other => {
                return Err(shape_error(
                    origin,
                    format!("expected a top-level object, found {}", kind_of(&other)),
                ));
            }
        };

        let entries = root
            .into_iter()
            .map(|(name, entry)| parse_entry(name, entry, origin))
            .collect::<Result<_, _>>()?;
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DatasetEntry> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }
}

impl FromIterator<DatasetEntry> for PerformanceDataset {
    fn from_iter<I: IntoIterator<Item = DatasetEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

fn parse_entry(name: String, entry: Value, origin: &str) -> Result<DatasetEntry, FusionError> {
    let mut entry = match entry {
        Value::Object(entry) => entry,
        other => {
            return Err(shape_error(
                origin,
                format!(
                    "entry for variable '{}' must be an object, found {}",
                    name,
                    kind_of(&other)
                ),
            ));
        }
    };

    let performance = match entry.remove(PERFORMANCE_KEY) {
        None | Some(Value::Null) => None,
        Some(Value::Object(subjects)) => Some(
            subjects
                .into_iter()
                .map(|(subject, raw)| {
                    serde_json::from_value::<Annotation>(raw)
                        .map(|annotation| (subject.clone(), annotation))
                        .map_err(|e| {
                            shape_error(
                                origin,
                                format!(
                                    "annotation for variable '{}', subject '{}': {}",
                                    name, subject, e
                                ),
                            )
                        })
                })
                .collect::<Result<_, _>>()?,
        ),
        Some(other) => {
            return Err(shape_error(
                origin,
                format!(
                    "'{}' of variable '{}' must be an object, found {}",
                    PERFORMANCE_KEY,
                    name,
                    kind_of(&other)
                ),
            ));
        }
    };

    Ok(DatasetEntry { name, performance })
}
