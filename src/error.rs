use thiserror::Error;

/// Fatal errors that abort a fusion run before any output is persisted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FusionError {
    #[error("File not found: '{path}'")]
    NotFound { path: String },

    #[error("Could not read '{path}': {message}")]
    Read { path: String, message: String },

    #[error("Invalid JSON in '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("Could not write fused schema to '{path}': {message}")]
    Write { path: String, message: String },
}

/// Errors raised while persisting the missing-variables report.
///
/// These never invalidate a run: by the time the report is written the fused
/// schema is already on disk.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReportError {
    #[error("Could not save missing variables list to '{path}': {message}")]
    Write { path: String, message: String },
}
