use crate::error::{FusionError, ReportError};
use crate::fusion::{FusionEngine, FusionResult};
use crate::performance::{BatchTimestamp, PerformanceDataset};
use crate::report::{FusionSummary, ReportGenerator};
use crate::schema::SchemaDocument;
use chrono::{Local, NaiveDateTime};
use std::path::PathBuf;
use tracing::{info, warn};

pub const DEFAULT_DEFINITIONS_PATH: &str = "schema_main_variables_to_be_fused.json";
pub const DEFAULT_PERFORMANCE_PATH: &str = "schema_performances_to_be_fused.json";
pub const DEFAULT_OUTPUT_PATH: &str = "schema_v01_fused.json";
pub const DEFAULT_MISSING_REPORT_PATH: &str = "missing_variables.txt";

/// Where a fusion run reads its inputs and writes its outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FusionConfig {
    pub definitions_path: PathBuf,
    pub performance_path: PathBuf,
    pub output_path: PathBuf,
    pub missing_report_path: PathBuf,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            definitions_path: PathBuf::from(DEFAULT_DEFINITIONS_PATH),
            performance_path: PathBuf::from(DEFAULT_PERFORMANCE_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            missing_report_path: PathBuf::from(DEFAULT_MISSING_REPORT_PATH),
        }
    }
}

/// What happened to the missing-variables report.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportStatus {
    /// Every dataset variable was already defined; nothing to report.
    NotNeeded,
    Written(PathBuf),
    Failed(ReportError),
}

/// The result of a successful run.
#[derive(Debug, Clone)]
pub struct FusionOutcome {
    pub result: FusionResult,
    pub summary: FusionSummary,
    pub report: ReportStatus,
    pub timestamp: BatchTimestamp,
}

/// A complete fusion run: load both inputs, fuse, write the fused schema,
/// then write the missing-variables report.
pub struct FusionJob {
    config: FusionConfig,
    timestamp: BatchTimestamp,
    report_time: Option<NaiveDateTime>,
}

pub struct FusionJobBuilder {
    config: FusionConfig,
    timestamp: Option<BatchTimestamp>,
    report_time: Option<NaiveDateTime>,
}

impl FusionJobBuilder {
    pub fn new(config: FusionConfig) -> Self {
        Self {
            config,
            timestamp: None,
            report_time: None,
        }
    }

    /// Pins the batch timestamp instead of taking the current time at build.
    pub fn with_timestamp(mut self, timestamp: BatchTimestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Pins the generation time printed in the missing-variables report.
    pub fn with_report_time(mut self, report_time: NaiveDateTime) -> Self {
        self.report_time = Some(report_time);
        self
    }

    pub fn build(self) -> FusionJob {
        FusionJob {
            config: self.config,
            timestamp: self.timestamp.unwrap_or_else(BatchTimestamp::now),
            report_time: self.report_time,
        }
    }
}

impl FusionJob {
    pub fn builder(config: FusionConfig) -> FusionJobBuilder {
        FusionJobBuilder::new(config)
    }

    pub fn config(&self) -> &FusionConfig {
        &self.config
    }

    pub fn timestamp(&self) -> &BatchTimestamp {
        &self.timestamp
    }

    /// Runs the job. Any input or output failure aborts with nothing written;
    /// a failed report write is only recorded in the outcome.
    pub fn run(&self) -> Result<FusionOutcome, FusionError> {
        let mut document = SchemaDocument::load(&self.config.definitions_path)?;
        let dataset = PerformanceDataset::load(&self.config.performance_path)?;

        let engine = FusionEngine::new(self.timestamp.clone());
        let result = engine.fuse(&mut document, &dataset);

        document.save(&self.config.output_path)?;

        let summary = FusionSummary::new(&document, &result);
        let report = if summary.missing.is_empty() {
            ReportStatus::NotNeeded
        } else {
            let generated_at = self
                .report_time
                .unwrap_or_else(|| Local::now().naive_local());
            let path = &self.config.missing_report_path;
            match ReportGenerator::write_missing_report(&summary, path, generated_at) {
                Ok(()) => ReportStatus::Written(path.clone()),
                Err(e) => {
                    warn!(error = %e, "missing variables report was not saved");
                    ReportStatus::Failed(e)
                }
            }
        };

        info!(
            total = summary.total_variables,
            coverage = summary.coverage_percent,
            "fusion completed"
        );
        Ok(FusionOutcome {
            result,
            summary,
            report,
            timestamp: self.timestamp.clone(),
        })
    }
}
