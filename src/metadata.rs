use serde_yaml::{Mapping, Value};

// @module: Key/value metadata shared by profiles and front-matter

/// Insertion-ordered mapping of metadata keys to YAML scalar values.
///
/// Both configuration profiles and show notes front-matter are held in this
/// form so they can be merged with the same right-biased rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata(Mapping);

impl Metadata {
    // @creates: Empty metadata
    pub fn new() -> Self {
        Self(Mapping::new())
    }

    /// Build metadata from a YAML value; `null` becomes an empty mapping.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Mapping(mapping) => Some(Self(mapping)),
            Value::Null => Some(Self::new()),
            Value::Tagged(tagged) => Self::from_value(tagged.value),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Insert or replace a value, keeping the position of an existing key
    pub fn insert<V: Into<Value>>(&mut self, key: &str, value: V) {
        self.0.insert(Value::String(key.to_string()), value.into());
    }

    /// Merge `other` over `self`: keys present in `other` win.
    pub fn merge(&mut self, other: &Metadata) {
        for (key, value) in other.0.iter() {
            self.0.insert(key.clone(), value.clone());
        }
    }

    // @returns: A new mapping with `other` merged over `self`
    pub fn merged_with(&self, other: &Metadata) -> Metadata {
        let mut merged = self.clone();
        merged.merge(other);
        merged
    }

    /// Rendered string form of a scalar value.
    ///
    /// Returns `None` when the key is absent, null, or holds a mapping.
    pub fn get_string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::Null => None,
            value => render_value(value),
        }
    }

    /// Like [`Metadata::get_string`] but treats blank strings as absent.
    pub fn non_empty(&self, key: &str) -> Option<String> {
        self.get_string(key).filter(|s| !s.trim().is_empty())
    }

    /// Truthiness of a flag such as `include_metadata`.
    pub fn flag(&self, key: &str) -> bool {
        match self.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_i64().is_some_and(|n| n != 0),
            Some(Value::String(s)) => {
                matches!(s.trim().to_lowercase().as_str(), "true" | "yes" | "on" | "1")
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over keys and rendered values in insertion order
    pub fn entries(&self) -> impl Iterator<Item = (String, String)> + '_ {
        self.0.iter().map(|(key, value)| {
            let key = render_value(key).unwrap_or_default();
            let value = render_value(value).unwrap_or_else(|| "{...}".to_string());
            (key, value)
        })
    }
}

impl From<Mapping> for Metadata {
    fn from(mapping: Mapping) -> Self {
        Self(mapping)
    }
}

/// Render a YAML value the way it is substituted into templates and tags.
///
/// Strings are returned verbatim, booleans and numbers in their YAML form,
/// null as an empty string, and sequences joined with `, `. Nested mappings
/// have no textual form.
pub fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Sequence(items) => items
            .iter()
            .map(render_value)
            .collect::<Option<Vec<_>>>()
            .map(|parts| parts.join(", ")),
        Value::Mapping(_) => None,
        Value::Tagged(tagged) => render_value(&tagged.value),
    }
}
