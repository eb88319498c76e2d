use super::annotation::Annotation;
use super::outcome::{BatchTimestamp, PerformanceRecord, SubjectOutcome};

/// Converts one variable's per-subject annotations into its sparse
/// performance record.
///
/// Subjects whose annotation yields no flags (blank, inert, or an
/// `unmatched` object with nothing set) are left out entirely. Every
/// outcome that is kept is stamped with the same `timestamp`.
pub fn normalize(
    annotations: &[(String, Annotation)],
    timestamp: &BatchTimestamp,
) -> PerformanceRecord {
    annotations
        .iter()
        .filter_map(|(subject, annotation)| {
            SubjectOutcome::new(annotation.flags(), timestamp.clone())
                .map(|outcome| (subject.clone(), outcome))
        })
        .collect()
}
