//! Attribute values and the ordered attribute lists that hold them.

use super::keys;
use crate::adt::map::OrderedMap;
use crate::core::error::DotError;
use std::fmt;

/// The value of an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{}", s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Text(s.clone())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// The kind of object that an attribute list belongs to. It decides which
/// keys are valid in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Graph,
    Node,
    Edge,
    Subgraph,
    ClusterSubgraph,
}

impl AttributeKind {
    pub fn name(&self) -> &'static str {
        match self {
            AttributeKind::Graph => "graph",
            AttributeKind::Node => "node",
            AttributeKind::Edge => "edge",
            AttributeKind::Subgraph => "subgraph",
            AttributeKind::ClusterSubgraph => "cluster",
        }
    }
}

/// An ordered list of attributes. Setting a key that is already in the list
/// replaces the value and keeps the position of the key.
#[derive(Debug, Clone, PartialEq)]
pub struct Attributes {
    kind: AttributeKind,
    values: OrderedMap<String, Value>,
    comment: Option<String>,
}

impl Attributes {
    pub fn new(kind: AttributeKind) -> Self {
        Self {
            kind,
            values: OrderedMap::new(),
            comment: None,
        }
    }

    pub fn kind(&self) -> AttributeKind {
        self.kind
    }

    pub(crate) fn set_kind(&mut self, kind: AttributeKind) {
        self.kind = kind;
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.values.has(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Sets the attribute if \p key is a known attribute of this kind of
    /// list.
    pub fn try_set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<(), DotError> {
        let key = key.into();
        if !keys::is_valid_key(self.kind, &key) {
            return Err(DotError::Validation {
                key,
                kind: self.kind.name().to_string(),
            });
        }
        self.values.insert(key, value.into());
        Ok(())
    }

    pub fn delete(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Sets all of the pairs in \p attrs, in order.
    pub fn apply<I, K, V>(&mut self, attrs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (key, value) in attrs {
            self.set(key, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn set_comment(&mut self, comment: Option<String>) {
        self.comment = comment;
    }
}

/// Objects that own a list of attributes.
pub trait HasAttributes {
    fn attributes(&self) -> &Attributes;
    fn attributes_mut(&mut self) -> &mut Attributes;

    fn get(&self, key: &str) -> Option<&Value> {
        self.attributes().get(key)
    }

    fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes_mut().set(key, value)
    }

    fn try_set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<(), DotError> {
        self.attributes_mut().try_set(key, value)
    }

    fn apply<I, K, V>(&mut self, attrs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.attributes_mut().apply(attrs)
    }
}

/// Objects that may carry a comment.
pub trait HasComment {
    fn comment(&self) -> Option<&str>;
    fn set_comment(&mut self, comment: Option<String>);
}

impl HasComment for Attributes {
    fn comment(&self) -> Option<&str> {
        Attributes::comment(self)
    }
    fn set_comment(&mut self, comment: Option<String>) {
        Attributes::set_comment(self, comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_keeps_order() {
        let mut attrs = Attributes::new(AttributeKind::Node);
        attrs.set("color", "red");
        attrs.set("width", 2);
        attrs.set("color", "blue");
        let keys: Vec<&str> = attrs.keys().collect();
        assert_eq!(keys, vec!["color", "width"]);
        assert_eq!(attrs.get("color"), Some(&Value::from("blue")));
        assert_eq!(attrs.get("width").and_then(|v| v.as_number()), Some(2.));
    }

    #[test]
    fn apply_pairs() {
        let mut attrs = Attributes::new(AttributeKind::Edge);
        attrs.apply([("label", Value::from("x")), ("weight", Value::from(3))]);
        attrs.apply(vec![("constraint".to_string(), false)]);
        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs.get("constraint"), Some(&Value::Bool(false)));
        assert_eq!(attrs.delete("label"), Some(Value::from("x")));
        assert!(!attrs.has("label"));
    }

    #[test]
    fn validation() {
        let mut attrs = Attributes::new(AttributeKind::Node);
        assert!(attrs.try_set("shape", "box").is_ok());
        let err = attrs.try_set("rankdir", "LR").unwrap_err();
        assert_eq!(
            err,
            DotError::Validation {
                key: "rankdir".to_string(),
                kind: "node".to_string()
            }
        );
        assert!(!attrs.has("rankdir"));
    }

    #[test]
    fn display() {
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::from(2).to_string(), "2");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from("a b").to_string(), "a b");
    }
}
