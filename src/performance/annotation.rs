use super::outcome::Flag;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeSet;

/// A subject's raw annotation, classified by the first matching rule:
///
/// 1. truthy `matched` → [`Annotation::Matched`]
/// 2. truthy `blank` → [`Annotation::Blank`]
/// 3. a non-null `unmatched` object → [`Annotation::Unmatched`]
/// 4. anything else → [`Annotation::Inert`]
///
/// Keys that a higher rule shadows are never inspected, so `{"blank": true,
/// "unmatched": "garbage"}` is still `Blank`. Only a winning `unmatched`
/// value that is not an object fails to load.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawAnnotation")]
pub enum Annotation {
    Matched,
    Blank,
    Unmatched(UnmatchedFlags),
    Inert,
}

impl Annotation {
    /// The output flags this annotation produces. Empty for `Blank` and `Inert`.
    pub fn flags(&self) -> BTreeSet<Flag> {
        match self {
            Annotation::Matched => BTreeSet::from([Flag::Match]),
            Annotation::Blank | Annotation::Inert => BTreeSet::new(),
            Annotation::Unmatched(unmatched) => unmatched.flags().collect(),
        }
    }
}

/// The wire shape of an annotation before precedence is applied. Values stay
/// untyped until their rule wins.
#[derive(Deserialize)]
struct RawAnnotation {
    #[serde(default)]
    matched: Value,
    #[serde(default)]
    blank: Value,
    #[serde(default)]
    unmatched: Value,
}

impl TryFrom<RawAnnotation> for Annotation {
    type Error = serde_json::Error;

    fn try_from(raw: RawAnnotation) -> Result<Self, Self::Error> {
        if is_truthy(&raw.matched) {
            Ok(Annotation::Matched)
        } else if is_truthy(&raw.blank) {
            Ok(Annotation::Blank)
        } else if !raw.unmatched.is_null() {
            serde_json::from_value(raw.unmatched).map(Annotation::Unmatched)
        } else {
            Ok(Annotation::Inert)
        }
    }
}

/// JSON truthiness: `null`, `false`, zero and empty strings, arrays or
/// objects are false; everything else is true.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Value::deserialize(deserializer).map(|value| is_truthy(&value))
}

/// The sub-flags of an `unmatched` annotation, named as in the dataset.
/// Each key is set when its value is truthy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UnmatchedFlags {
    #[serde(deserialize_with = "truthy")]
    pub correction: bool,
    #[serde(deserialize_with = "truthy")]
    pub standardized: bool,
    #[serde(deserialize_with = "truthy")]
    pub filled_blank: bool,
    #[serde(deserialize_with = "truthy")]
    pub improved_comment: bool,
    #[serde(deserialize_with = "truthy")]
    pub missing_docs: bool,
    #[serde(deserialize_with = "truthy")]
    pub contradictions: bool,
    #[serde(deserialize_with = "truthy")]
    pub questioned: bool,
}

impl UnmatchedFlags {
    /// Dataset key → output flag. `missing_docs` becomes `missing_doc`; every
    /// other key keeps its name.
    pub fn flags(&self) -> impl Iterator<Item = Flag> {
        [
            (self.correction, Flag::Correction),
            (self.standardized, Flag::Standardized),
            (self.filled_blank, Flag::FilledBlank),
            (self.improved_comment, Flag::ImprovedComment),
            (self.missing_docs, Flag::MissingDoc),
            (self.contradictions, Flag::Contradictions),
            (self.questioned, Flag::Questioned),
        ]
        .into_iter()
        .filter_map(|(set, flag)| set.then_some(flag))
    }
}
