//! Schema-less template document

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// YAML merge key; resolved on parse, so it cannot appear as a literal key
pub const MERGE_KEY: &str = "<<";

/// A template document: a tree of scalars, sequences and string-keyed mappings.
///
/// Mappings are ordered by key, so a stored template always serializes with
/// its keys sorted. Being an owned tree, a value can never refer to itself.
/// Integers up to `i64::MAX` are `Integer`, larger ones up to `u64::MAX` are
/// `UInt`; YAML integers beyond that do not parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateValue {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    UInt(u64),
    Float(f64),
    String(String),
    Sequence(Vec<TemplateValue>),
    Mapping(BTreeMap<String, TemplateValue>),
}

impl TemplateValue {
    /// Create an empty mapping
    pub fn mapping() -> Self {
        TemplateValue::Mapping(BTreeMap::new())
    }

    /// Parse a YAML (or JSON) document, flattening `<<: *anchor` merge keys
    /// into their mapping. Keys already present win over merged ones.
    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        let mut value: serde_yaml::Value = serde_yaml::from_str(text)?;
        value.apply_merge()?;
        serde_yaml::from_value(value)
    }

    /// Render as a block-style YAML document
    pub fn to_yaml_string(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Look up a key when this value is a mapping
    pub fn get(&self, key: &str) -> Option<&TemplateValue> {
        match self {
            TemplateValue::Mapping(map) => map.get(key),
            _ => None,
        }
    }

    /// Insert a key, turning `Null` into a mapping first. Returns the previous
    /// value, or `None` when this value is not a mapping.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<TemplateValue>) -> Option<TemplateValue> {
        if self.is_null() {
            *self = TemplateValue::mapping();
        }
        match self {
            TemplateValue::Mapping(map) => map.insert(key.into(), value.into()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TemplateValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&BTreeMap<String, TemplateValue>> {
        match self {
            TemplateValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[TemplateValue]> {
        match self {
            TemplateValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, TemplateValue::Null)
    }

    /// Whether any mapping in the tree has a literal `<<` key
    pub fn contains_merge_key(&self) -> bool {
        let mut stack = vec![self];
        while let Some(value) = stack.pop() {
            match value {
                TemplateValue::Sequence(items) => stack.extend(items),
                TemplateValue::Mapping(map) => {
                    if map.contains_key(MERGE_KEY) {
                        return true;
                    }
                    stack.extend(map.values());
                }
                _ => {}
            }
        }
        false
    }

    /// Number of nested container levels (scalars are 0, `{}` is 1).
    ///
    /// Walks the tree with an explicit stack so arbitrarily deep values
    /// cannot overflow the call stack here.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self, 0usize)];
        while let Some((value, level)) = stack.pop() {
            match value {
                TemplateValue::Sequence(items) => {
                    max = max.max(level + 1);
                    stack.extend(items.iter().map(|v| (v, level + 1)));
                }
                TemplateValue::Mapping(map) => {
                    max = max.max(level + 1);
                    stack.extend(map.values().map(|v| (v, level + 1)));
                }
                _ => {}
            }
        }
        max
    }
}

impl From<&str> for TemplateValue {
    fn from(s: &str) -> Self {
        TemplateValue::String(s.to_string())
    }
}

impl From<String> for TemplateValue {
    fn from(s: String) -> Self {
        TemplateValue::String(s)
    }
}

impl From<bool> for TemplateValue {
    fn from(b: bool) -> Self {
        TemplateValue::Bool(b)
    }
}

impl From<i64> for TemplateValue {
    fn from(n: i64) -> Self {
        TemplateValue::Integer(n)
    }
}

impl From<u64> for TemplateValue {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(n) => TemplateValue::Integer(n),
            Err(_) => TemplateValue::UInt(n),
        }
    }
}

impl From<f64> for TemplateValue {
    fn from(n: f64) -> Self {
        TemplateValue::Float(n)
    }
}

impl<T: Into<TemplateValue>> From<Vec<T>> for TemplateValue {
    fn from(items: Vec<T>) -> Self {
        TemplateValue::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<TemplateValue>> From<Option<T>> for TemplateValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(TemplateValue::Null)
    }
}

impl<K: Into<String>, V: Into<TemplateValue>> FromIterator<(K, V)> for TemplateValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        TemplateValue::Mapping(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
