use crate::performance::{BatchTimestamp, PerformanceDataset, normalize};
use crate::schema::SchemaDocument;
use tracing::{debug, info};

mod placeholder;

pub use placeholder::{PLACEHOLDER_GROUP, PLACEHOLDER_NOTES, create_placeholder};

/// Statistics of a single fusion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FusionResult {
    /// Existing definitions that received a performance record.
    pub fused_count: usize,
    /// Placeholder definitions created for unknown variables.
    pub created_count: usize,
    /// Every variable touched by the run, in dataset order.
    pub variables_with_performance: Vec<String>,
    /// Variables that received a placeholder, in dataset order.
    pub missing_variables: Vec<String>,
}

/// Merges a performance dataset into a definition schema.
///
/// Variables are visited in dataset order:
///
/// * A variable the schema already defines gets its normalized record
///   attached as `performance` and counts as fused. If its dataset entry has
///   no `performance` object it is skipped and counted nowhere.
/// * A variable the schema does not define always gets a placeholder
///   appended, counts as created and is listed in
///   `variables_with_performance`, even when its dataset entry carries no
///   `performance` object. Placeholders without performance data therefore
///   still raise the coverage figure.
pub struct FusionEngine {
    timestamp: BatchTimestamp,
}

impl FusionEngine {
    pub fn new(timestamp: BatchTimestamp) -> Self {
        Self { timestamp }
    }

    pub fn timestamp(&self) -> &BatchTimestamp {
        &self.timestamp
    }

    /// Fuses `dataset` into `document` in place.
    pub fn fuse(&self, document: &mut SchemaDocument, dataset: &PerformanceDataset) -> FusionResult {
        info!(
            schema_variables = document.len(),
            dataset_variables = dataset.len(),
            "fusing performance data"
        );
        let mut result = FusionResult::default();

        for entry in dataset.iter() {
            let record = entry
                .performance
                .as_deref()
                .map(|annotations| normalize(annotations, &self.timestamp));

            if document.contains(&entry.name) {
                let Some(record) = record else {
                    debug!(variable = %entry.name, "no performance data; skipping");
                    continue;
                };
                document.attach_performance(&entry.name, &record);
                debug!(variable = %entry.name, subjects = record.len(), "fused");
                result.fused_count += 1;
            } else {
                let mut placeholder = create_placeholder(&entry.name);
                placeholder.performance = record;
                debug!(
                    variable = %entry.name,
                    subjects = placeholder.performance.as_ref().map_or(0, |r| r.len()),
                    "created placeholder"
                );
                document.insert(entry.name.clone(), placeholder);
                result.created_count += 1;
                result.missing_variables.push(entry.name.clone());
            }
            result.variables_with_performance.push(entry.name.clone());
        }

        info!(
            fused = result.fused_count,
            created = result.created_count,
            "fusion finished"
        );
        result
    }
}
