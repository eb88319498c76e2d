//! # schema-fuse - Definition Schema and Performance Data Fusion
//!
//! **schema-fuse** merges two independently authored JSON documents that
//! describe the same named variables:
//!
//! - a *definition schema*, holding each variable's type, description and
//!   grouping metadata, either as a bare map or wrapped in `{"properties": ...}`;
//! - a *performance dataset*, holding per-subject annotations for each
//!   variable as produced by a separate evaluation process.
//!
//! The result is a single schema in which every variable carries its
//! definition plus a normalized `performance` record. Variables that only the
//! dataset knows about receive placeholder definitions, and a run reports
//! coverage figures and the list of placeholders it created.
//!
//! ## Core Workflow
//!
//! 1.  **Load**: [`SchemaDocument::load`] and [`PerformanceDataset::load`] read
//!     and validate the two inputs. Annotations are classified into
//!     [`Annotation`] variants while loading.
//! 2.  **Fuse**: [`FusionEngine::fuse`] walks the dataset in order, attaching
//!     normalized records to known variables and appending placeholders for
//!     unknown ones. All records of a run share one [`BatchTimestamp`].
//! 3.  **Persist**: [`SchemaDocument::save`] writes the fused schema atomically.
//! 4.  **Report**: [`FusionSummary`] and [`ReportGenerator`] derive the console
//!     summary and the missing-variables report.
//!
//! [`FusionJob`] runs all four steps against a [`FusionConfig`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use schema_fuse::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let outcome = FusionJob::builder(FusionConfig::default()).build().run()?;
//!     println!("{}", ReportGenerator::render_console(&outcome.summary));
//!     Ok(())
//! }
//! ```
//!
//! Or, step by step:
//!
//! ```rust
//! use schema_fuse::prelude::*;
//! use serde_json::json;
//!
//! let mut document = SchemaDocument::from_value(
//!     json!({ "age": { "description": "Age in years" } }),
//!     "inline",
//! ).unwrap();
//! let dataset = PerformanceDataset::from_value(
//!     json!({
//!         "age": { "performance": { "p1": { "matched": true } } },
//!         "weight": { "performance": { "p1": { "unmatched": { "missing_docs": true } } } }
//!     }),
//!     "inline",
//! ).unwrap();
//!
//! let engine = FusionEngine::new(BatchTimestamp::from("2025-01-01T00:00:00Z"));
//! let result = engine.fuse(&mut document, &dataset);
//!
//! assert_eq!(result.fused_count, 1);
//! assert_eq!(result.created_count, 1);
//! assert!(document.performance_of("weight").unwrap()["p1"]["missing_doc"] == true);
//! ```

pub mod error;
pub mod fusion;
pub mod job;
pub mod performance;
pub mod persist;
pub mod prelude;
pub mod report;
pub mod schema;

pub use error::{FusionError, ReportError};
pub use fusion::{FusionEngine, FusionResult};
pub use job::{FusionConfig, FusionJob, FusionOutcome, ReportStatus};
pub use performance::{Annotation, BatchTimestamp, PerformanceDataset, PerformanceRecord};
pub use report::{FusionSummary, ReportGenerator};
pub use schema::{SchemaDocument, VariableDefinition};
