use crate::schema::{PrimitiveType, VariableDefinition};

/// Group assigned to every placeholder.
pub const PLACEHOLDER_GROUP: &str = "unknown";

pub const PLACEHOLDER_NOTES: &str = "This variable was automatically created as a placeholder \
because it existed in performance data but not in the main schema. Please update with proper \
definition, type, and metadata.";

/// Synthesizes a minimal definition for a variable that only the performance
/// dataset knows about: a nullable string with no options and no performance.
pub fn create_placeholder(var_name: &str) -> VariableDefinition {
    VariableDefinition {
        type_union: vec![PrimitiveType::String, PrimitiveType::Null],
        default: None,
        description: format!("Placeholder for {var_name} — please update with proper definition"),
        group_id: PLACEHOLDER_GROUP.to_string(),
        notes: PLACEHOLDER_NOTES.to_string(),
        options: None,
        performance: None,
    }
}
