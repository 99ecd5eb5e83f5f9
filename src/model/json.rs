//! `serde_json`-backed structured values and the codec collaborator

use super::Structured;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured value over a parsed JSON document.
///
/// Absence (missing key, out-of-range index, unparseable document) is
/// carried as `None` rather than conflated with JSON `null`, so navigation
/// from an absent value stays absent without panicking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonValue {
    content: Option<Value>,
}

impl JsonValue {
    /// Wrap an already-parsed document.
    pub fn new(content: Value) -> Self {
        Self {
            content: Some(content),
        }
    }

    /// The absent value.
    pub fn absent() -> Self {
        Self { content: None }
    }

    /// Parse a wire-format string; an unparseable document yields the
    /// absent value.
    pub fn parse(content: &str) -> Self {
        Self {
            content: serde_json::from_str(content).ok(),
        }
    }

    /// Borrow the underlying document, if present.
    pub fn as_value(&self) -> Option<&Value> {
        self.content.as_ref()
    }
}

impl Structured for JsonValue {
    fn child_at(&self, index: usize) -> Box<dyn Structured> {
        let child = self
            .content
            .as_ref()
            .and_then(|value| value.get(index))
            .cloned();
        Box::new(Self { content: child })
    }

    fn child_key(&self, key: &str) -> Box<dyn Structured> {
        let child = self
            .content
            .as_ref()
            .and_then(|value| value.get(key))
            .cloned();
        Box::new(Self { content: child })
    }

    fn independent_copy(&self) -> Box<dyn Structured> {
        Box::new(self.clone())
    }

    fn is_absent(&self) -> bool {
        self.content.is_none()
    }

    fn render(&self) -> String {
        match &self.content {
            Some(Value::String(text)) => text.clone(),
            Some(value) => value.to_string(),
            None => String::new(),
        }
    }
}

/// Serialization collaborator: native ordered key/value pairs to a
/// wire-format string and back to a structured value.
pub trait JsonCodec: Send + Sync {
    /// Deserialize wire content into a structured value. Unparseable
    /// content yields an absent value, not an error.
    fn deserialize(&self, content: &str) -> Box<dyn Structured>;

    /// Serialize ordered string pairs as a wire-format object.
    fn serialize_pairs(&self, pairs: &[(String, String)]) -> String;
}

/// The `serde_json` codec.
#[derive(Debug, Default, Clone, Copy)]
pub struct SerdeJsonCodec;

impl JsonCodec for SerdeJsonCodec {
    fn deserialize(&self, content: &str) -> Box<dyn Structured> {
        Box::new(JsonValue::parse(content))
    }

    fn serialize_pairs(&self, pairs: &[(String, String)]) -> String {
        let object: serde_json::Map<String, Value> = pairs
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect();
        Value::Object(object).to_string()
    }
}
