use crate::error::FusionError;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Reads and parses a JSON document from disk.
///
/// A missing file is reported as [`FusionError::NotFound`], any other I/O
/// failure as [`FusionError::Read`], and malformed content as
/// [`FusionError::Parse`].
pub fn read_json(path: impl AsRef<Path>) -> Result<Value, FusionError> {
    let path = path.as_ref();
    let origin = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => FusionError::NotFound {
            path: origin.clone(),
        },
        _ => FusionError::Read {
            path: origin.clone(),
            message: e.to_string(),
        },
    })?;
    debug!(path = %origin, bytes = content.len(), "read JSON document");

    serde_json::from_str(&content).map_err(|e| FusionError::Parse {
        path: origin,
        message: e.to_string(),
    })
}

/// Builds a [`FusionError::Parse`] for a document that is valid JSON but has
/// the wrong shape.
pub(crate) fn shape_error(origin: &str, message: impl Into<String>) -> FusionError {
    FusionError::Parse {
        path: origin.to_string(),
        message: message.into(),
    }
}

/// Short name of a JSON value's kind, for error messages.
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
