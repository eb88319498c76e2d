use crate::fusion::FusionResult;
use crate::schema::SchemaDocument;
use std::collections::BTreeSet;

/// A placeholder variable and how many subjects carry data for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingVariable {
    pub name: String,
    pub subject_count: usize,
}

/// Figures derived from a fused document and the run that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct FusionSummary {
    pub total_variables: usize,
    pub fused_count: usize,
    pub created_count: usize,
    pub with_performance: usize,
    /// Share of variables touched by the run, in percent. `0.0` for an empty schema.
    pub coverage_percent: f64,
    /// Subject IDs of the first touched variable that carries a performance
    /// record. A sample, not a union over all variables.
    pub subject_ids: BTreeSet<String>,
    /// Sorted by name.
    pub missing: Vec<MissingVariable>,
}

impl FusionSummary {
    pub fn new(document: &SchemaDocument, result: &FusionResult) -> Self {
        let total_variables = document.len();
        let with_performance = result.variables_with_performance.len();
        let coverage_percent = if total_variables == 0 {
            0.0
        } else {
            with_performance as f64 / total_variables as f64 * 100.0
        };

        let subject_ids = result
            .variables_with_performance
            .iter()
            .find_map(|name| document.performance_of(name))
            .map(|record| record.keys().cloned().collect())
            .unwrap_or_default();

        let mut missing: Vec<MissingVariable> = result
            .missing_variables
            .iter()
            .map(|name| MissingVariable {
                name: name.clone(),
                subject_count: document.performance_of(name).map_or(0, |record| record.len()),
            })
            .collect();
        missing.sort_by(|a, b| a.name.cmp(&b.name));

        Self {
            total_variables,
            fused_count: result.fused_count,
            created_count: result.created_count,
            with_performance,
            coverage_percent,
            subject_ids,
            missing,
        }
    }
}
