//! Canonical value model.
//!
//! Every parser path (object notation, markup, pass-through) converges on
//! `Value`, a tagged variant type that replaces the original system's
//! any-shaped dynamic mappings. `Mapping` preserves insertion order so
//! downstream error reporting stays deterministic.

use serde_json::Number;

/// A canonical value: string, number, boolean, ordered mapping, or sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Num(Number),
    Bool(bool),
    Map(Mapping),
    Seq(Vec<Value>),
}

/// Insertion-ordered key/value structure. Inserting an existing key
/// replaces its value in place; lookup is exact-key equality.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mapping {
    entries: Vec<(String, Value)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Value {
    /// Coerce any value to its string form, the way the intake record
    /// fields are stringified: strings pass through, numbers and booleans
    /// render via display, containers render as their JSON text.
    pub fn coerce_str(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            Value::Num(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Map(_) | Value::Seq(_) => self.to_json().to_string(),
        }
    }

    pub fn as_map(&self) -> Option<&Mapping> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// JSON rendering used for container stringification and diagnostics.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::Num(n) => serde_json::Value::Number(n.clone()),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Map(m) => serde_json::Value::Object(
                m.iter()
                    .map(|(k, v)| (k.to_string(), v.to_json()))
                    .collect(),
            ),
            Value::Seq(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
        }
    }
}

/// The canonical model carries no null; JSON null coerces to the empty
/// string, matching the treatment of absent record fields downstream.
impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Str(String::new()),
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Num(n),
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::Seq(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                let mut out = Mapping::new();
                for (k, v) in map {
                    out.insert(k, Value::from(v));
                }
                Value::Map(out)
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Num(Number::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Mapping> for Value {
    fn from(m: Mapping) -> Self {
        Value::Map(m)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_preserves_order_and_replaces() {
        let mut m = Mapping::new();
        m.insert("b", 1);
        m.insert("a", 2);
        m.insert("b", 3);

        let keys: Vec<&str> = m.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(m.get("b"), Some(&Value::Num(Number::from(3))));
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn test_coerce_str_scalars() {
        assert_eq!(Value::Str("x".into()).coerce_str(), "x");
        assert_eq!(Value::from(12345).coerce_str(), "12345");
        assert_eq!(Value::Bool(true).coerce_str(), "true");
    }

    #[test]
    fn test_coerce_str_containers_render_as_json() {
        let mut m = Mapping::new();
        m.insert("k", "v");
        assert_eq!(Value::Map(m).coerce_str(), r#"{"k":"v"}"#);
        assert_eq!(
            Value::Seq(vec![Value::from(1), Value::from(2)]).coerce_str(),
            "[1,2]"
        );
    }

    #[test]
    fn test_json_null_becomes_empty_string() {
        let v = Value::from(serde_json::json!({"id": null}));
        let m = v.as_map().unwrap();
        assert_eq!(m.get("id"), Some(&Value::Str(String::new())));
    }
}
