//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types of the schema-fuse
//! crate so a single glob import covers a full fusion run.
//!
//! # Example
//!
//! ```rust,no_run
//! use schema_fuse::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let mut document = SchemaDocument::load("path/to/definitions.json")?;
//! let dataset = PerformanceDataset::load("path/to/performance.json")?;
//!
//! let engine = FusionEngine::new(BatchTimestamp::now());
//! let result = engine.fuse(&mut document, &dataset);
//! document.save("path/to/fused.json")?;
//!
//! let summary = FusionSummary::new(&document, &result);
//! println!("{}", ReportGenerator::render_console(&summary));
//! # Ok(())
//! # }
//! ```

// Loading and the document model
pub use crate::performance::{
    Annotation, BatchTimestamp, DatasetEntry, Flag, PerformanceDataset, PerformanceRecord,
    SubjectOutcome, normalize,
};
pub use crate::schema::{DefinitionMap, PrimitiveType, SchemaDocument, VariableDefinition};

// Fusion
pub use crate::fusion::{FusionEngine, FusionResult, create_placeholder};

// Reporting
pub use crate::report::{FusionSummary, MissingVariable, ReportGenerator};

// Running a whole job
pub use crate::job::{FusionConfig, FusionJob, FusionOutcome, ReportStatus};

// Error types
pub use crate::error::{FusionError, ReportError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
