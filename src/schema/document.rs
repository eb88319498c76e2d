use super::definition::{PERFORMANCE_KEY, VariableDefinition};
use super::loader::{kind_of, read_json, shape_error};
use crate::error::FusionError;
use crate::performance::PerformanceRecord;
use crate::persist::write_atomic;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, info};

/// Top-level key holding the variable map.
pub const PROPERTIES_KEY: &str = "properties";

/// Variable name → definition, in document order.
pub type DefinitionMap = Map<String, Value>;

/// A definition schema normalized to the `{ "properties": {...} }` shape.
///
/// Any other top-level keys of the input are kept in place and written back
/// out unchanged. Every definition in the map is a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    /// The outer object. Its `properties` slot holds a null placeholder.
    wrapper: Map<String, Value>,
    properties: DefinitionMap,
}

impl SchemaDocument {
    /// Loads a definition schema from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FusionError> {
        let path = path.as_ref();
        let document = Self::from_value(read_json(path)?, &path.display().to_string())?;
        info!(
            path = %path.display(),
            variables = document.len(),
            "loaded definition schema"
        );
        Ok(document)
    }

    /// Normalizes a parsed document. `origin` names the source in errors.
    pub fn from_value(value: Value, origin: &str) -> Result<Self, FusionError> {
        let mut root = match value {
            Value::Object(root) => root,
            other => {
                return Err(shape_error(
                    origin,
                    format!("expected a top-level object, found {}", kind_of(&other)),
                ));
            }
        };

        let (wrapper, properties) = match root.get_mut(PROPERTIES_KEY).map(Value::take) {
            Some(Value::Object(properties)) => (root, properties),
            Some(other) => {
                return Err(shape_error(
                    origin,
                    format!(
                        "'{}' must be an object, found {}",
                        PROPERTIES_KEY,
                        kind_of(&other)
                    ),
                ));
            }
            None => {
                debug!(origin, "no 'properties' key; treating document as a bare variable map");
                let mut wrapper = Map::new();
                wrapper.insert(PROPERTIES_KEY.to_string(), Value::Null);
                (wrapper, root)
            }
        };

        if let Some((name, value)) = properties.iter().find(|(_, v)| !v.is_object()) {
            return Err(shape_error(
                origin,
                format!(
                    "definition of variable '{}' must be an object, found {}",
                    name,
                    kind_of(value)
                ),
            ));
        }

        Ok(Self {
            wrapper,
            properties,
        })
    }

    /// Builds a document directly from a variable map.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = (String, VariableDefinition)>,
    ) -> Self {
        let mut wrapper = Map::new();
        wrapper.insert(PROPERTIES_KEY.to_string(), Value::Null);
        Self {
            wrapper,
            properties: definitions
                .into_iter()
                .map(|(name, definition)| (name, Value::from(definition)))
                .collect(),
        }
    }

    pub fn properties(&self) -> &DefinitionMap {
        &self.properties
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Sets the `performance` field of an existing definition, replacing any
    /// previous value in place. Returns `false` if `name` is not defined.
    pub fn attach_performance(&mut self, name: &str, record: &PerformanceRecord) -> bool {
        match self.properties.get_mut(name) {
            Some(Value::Object(definition)) => {
                definition.insert(PERFORMANCE_KEY.to_string(), Value::from(record));
                true
            }
            _ => false,
        }
    }

    /// Appends a new definition, or overwrites an existing one in place.
    pub fn insert(&mut self, name: impl Into<String>, definition: VariableDefinition) {
        self.properties.insert(name.into(), Value::from(definition));
    }

    /// The `performance` object of a definition. `None` when the variable is
    /// undefined, has no `performance`, or its `performance` is not an object.
    pub fn performance_of(&self, name: &str) -> Option<&Map<String, Value>> {
        self.properties
            .get(name)?
            .get(PERFORMANCE_KEY)?
            .as_object()
    }

    /// Pretty-prints the document with 2-space indentation. Non-ASCII text
    /// is written literally.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Writes the document to `path` atomically.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), FusionError> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let json = self.to_pretty_json().map_err(|e| FusionError::Write {
            path: origin.clone(),
            message: e.to_string(),
        })?;
        write_atomic(path, json.as_bytes()).map_err(|e| FusionError::Write {
            path: origin,
            message: e.to_string(),
        })?;
        info!(path = %path.display(), variables = self.len(), "wrote fused schema");
        Ok(())
    }

    /// Reassembles the full document as a JSON value.
    pub fn into_value(self) -> Value {
        let mut properties = Some(self.properties);
        let root = self
            .wrapper
            .into_iter()
            .map(|(key, value)| {
                if key == PROPERTIES_KEY {
                    let properties = properties.take().unwrap_or_default();
                    (key, Value::Object(properties))
                } else {
                    (key, value)
                }
            })
            .collect();
        Value::Object(root)
    }
}

impl Serialize for SchemaDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.wrapper.len()))?;
        for (key, value) in &self.wrapper {
            if key == PROPERTIES_KEY {
                map.serialize_entry(key, &self.properties)?;
            } else {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}
