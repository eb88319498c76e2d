use crate::performance::PerformanceRecord;
use serde_json::{Map, Value};

/// Key under which a fused definition carries its performance record.
pub const PERFORMANCE_KEY: &str = "performance";

/// A primitive JSON type tag, as used in a definition's `anyOf` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Null,
}

impl PrimitiveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveType::String => "string",
            PrimitiveType::Number => "number",
            PrimitiveType::Integer => "integer",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Object => "object",
            PrimitiveType::Array => "array",
            PrimitiveType::Null => "null",
        }
    }
}

/// A typed variable definition.
///
/// Definitions read from an input schema stay as raw JSON objects so that
/// fields this crate does not know about survive untouched. This type is
/// what the crate itself produces, e.g. for placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDefinition {
    /// Serialized as `anyOf: [{"type": ...}, ...]`, order preserved.
    pub type_union: Vec<PrimitiveType>,
    pub default: Option<Value>,
    pub description: String,
    pub group_id: String,
    pub notes: String,
    pub options: Option<Vec<Value>>,
    pub performance: Option<PerformanceRecord>,
}

impl From<VariableDefinition> for Value {
    fn from(definition: VariableDefinition) -> Self {
        let any_of = definition
            .type_union
            .iter()
            .map(|t| {
                let mut alternative = Map::new();
                alternative.insert("type".to_string(), Value::from(t.as_str()));
                Value::Object(alternative)
            })
            .collect();

        let mut object = Map::new();
        object.insert("anyOf".to_string(), Value::Array(any_of));
        object.insert(
            "default".to_string(),
            definition.default.unwrap_or(Value::Null),
        );
        object.insert(
            "description".to_string(),
            Value::String(definition.description),
        );
        object.insert("group_id".to_string(), Value::String(definition.group_id));
        object.insert("notes".to_string(), Value::String(definition.notes));
        if let Some(options) = definition.options {
            object.insert("options".to_string(), Value::Array(options));
        }
        if let Some(record) = &definition.performance {
            object.insert(PERFORMANCE_KEY.to_string(), Value::from(record));
        }
        Value::Object(object)
    }
}
