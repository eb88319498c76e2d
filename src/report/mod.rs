use crate::error::ReportError;
use crate::persist::write_atomic;
use chrono::NaiveDateTime;
use itertools::Itertools;
use std::path::Path;
use tracing::info;

mod summary;

pub use summary::{FusionSummary, MissingVariable};

const RULE: &str = "============================================================";
const THIN_RULE: &str = "------------------------------------------------------------";

/// Renders the human-readable outputs of a fusion run.
pub struct ReportGenerator;

impl ReportGenerator {
    /// The console summary: run figures, then the placeholder list and
    /// follow-up advice when placeholders were created.
    pub fn render_console(summary: &FusionSummary) -> String {
        let mut lines = vec![
            RULE.to_string(),
            "FUSION SUMMARY".to_string(),
            RULE.to_string(),
            format!("Total variables in main schema: {}", summary.total_variables),
            format!("  - Already existed: {}", summary.fused_count),
            format!("  - Created as placeholders: {}", summary.created_count),
            format!("Variables with performance data: {}", summary.with_performance),
            format!("Coverage: {:.1}%", summary.coverage_percent),
        ];

        if !summary.subject_ids.is_empty() {
            lines.push(format!("Total subjects: {}", summary.subject_ids.len()));
            lines.push(format!("Subject IDs: {}", summary.subject_ids.iter().join(", ")));
        }

        if !summary.missing.is_empty() {
            lines.extend([
                String::new(),
                RULE.to_string(),
                "MISSING VARIABLES (Created as Placeholders)".to_string(),
                RULE.to_string(),
                String::new(),
                format!(
                    "The following {} variables were NOT in the main schema",
                    summary.missing.len()
                ),
                "and have been created with placeholder definitions:".to_string(),
                String::new(),
            ]);
            lines.extend(summary.missing.iter().enumerate().map(|(i, missing)| {
                format!(
                    "{:2}. {:<40} ({} subjects)",
                    i + 1,
                    missing.name,
                    missing.subject_count
                )
            }));
            lines.extend(
                [
                    "",
                    THIN_RULE,
                    "RECOMMENDATIONS:",
                    THIN_RULE,
                    "These placeholder variables have minimal definitions:",
                    "  - anyOf: [string, null]",
                    "  - description: 'Placeholder for [variable_name]'",
                    "  - group_id: 'unknown'",
                    "",
                    "You should update these variables with proper:",
                    "  * Data types (anyOf structure)",
                    "  * Descriptions",
                    "  * Group IDs",
                    "  * Options (if enum type)",
                    "  * Notes",
                ]
                .map(str::to_string),
            );
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    /// The plain-text missing-variables report, sorted by variable name.
    pub fn render_missing_report(summary: &FusionSummary, generated_at: NaiveDateTime) -> String {
        let mut out = String::new();
        out.push_str("Missing Variables Report\n");
        out.push_str(RULE);
        out.push_str("\n\n");
        out.push_str(&format!(
            "Generated: {}\n\n",
            generated_at.format("%Y-%m-%d %H:%M:%S")
        ));
        out.push_str(&format!(
            "Total missing variables: {}\n\n",
            summary.missing.len()
        ));
        out.push_str("List of missing variables:\n");
        out.push_str(THIN_RULE);
        out.push('\n');
        for missing in &summary.missing {
            out.push_str(&format!(
                "{:<40} ({} subjects)\n",
                missing.name, missing.subject_count
            ));
        }
        out
    }

    /// Writes the missing-variables report to `path` atomically.
    pub fn write_missing_report(
        summary: &FusionSummary,
        path: impl AsRef<Path>,
        generated_at: NaiveDateTime,
    ) -> Result<(), ReportError> {
        let path = path.as_ref();
        let report = Self::render_missing_report(summary, generated_at);
        write_atomic(path, report.as_bytes()).map_err(|e| ReportError::Write {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        info!(
            path = %path.display(),
            missing = summary.missing.len(),
            "wrote missing variables report"
        );
        Ok(())
    }
}
